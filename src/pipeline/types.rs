use serde::Serialize;

/// Overall outcome of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStatus {
    Success,
    RegistrationFailed(i32),
    ConversionFailed(i32),
}

impl PipelineStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineStatus::Success)
    }

    /// Process exit code: zero on success, one on any failure.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// What a run produced, consumed by the artifact cleaner and optionally
/// serialized as a machine-readable report.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub status: PipelineStatus,
    pub composite_transform: String,
    pub output_base: String,
    pub reference_volume: Option<String>,
    pub displacement_field: Option<String>,
    /// The composite transform was an explicitly requested output and was
    /// left on disk.
    pub composite_kept: bool,
}
