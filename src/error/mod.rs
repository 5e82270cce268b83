//! Error types for the orchestration pipeline.

use std::io;
use thiserror::Error;

/// Validation errors raised before any engine is invoked.
///
/// These are terminal for the current invocation and map to exit code 1.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("missing reference volume")]
    MissingReferenceVolume,

    #[error("missing transform")]
    MissingTransform,

    #[error("specify either a transform node or a transform file")]
    AmbiguousTransform,

    #[error("specify either an output volume or an output transform (not both)")]
    ExclusiveVolumeAndTransform,

    #[error("specify either an output composite transform or an output displacement field (not both)")]
    ExclusiveTransformTargets,

    #[error("no output requested")]
    NoOutputRequested,

    #[error("at most {max} input volumes are supported, got {got}")]
    TooManyInputVolumes { max: usize, got: usize },

    #[error("unrecognized image extension on output path: {0}")]
    UnrecognizedExtension(String),
}

/// Failures surfaced once validation has passed and the engines are in play.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("{engine} exited with status {status}")]
    EngineFailure { engine: &'static str, status: i32 },

    #[error("failed to launch {engine}")]
    EngineLaunch {
        engine: String,
        #[source]
        source: io::Error,
    },
}
