//! The two-stage registration pipeline: run the registration engine, then,
//! only on success and only when a displacement field was requested, convert
//! the composite transform with the transform-application engine. Cleanup is
//! the terminal state and always runs.

pub mod cleanup;
pub mod types;

pub use types::{PipelineResult, PipelineStatus};

use std::io::Write;

use crate::command;
use crate::engine::EngineRunner;
use crate::error::ParameterError;
use crate::params::RegistrationParams;
use crate::paths::DerivedPaths;

/// Progress markers consumed by the hosting tool between the two stages.
/// Tag text and numeric values are part of the host wire contract.
pub const CONVERSION_COMMENT: &str =
    "<filter-comment>Converting composite transform to displacement field</filter-comment>";
pub const CONVERSION_PROGRESS: &str = "<filter-progress>0.99</filter-progress>";
pub const CONVERSION_STAGE_PROGRESS: &str = "<filter-stage-progress>1</filter-stage-progress>";

/// Drives the two engine stages against an injected runner and output sink.
/// Holds no state across invocations; every run derives its paths fresh.
pub struct Orchestrator<'a> {
    engines: &'a mut dyn EngineRunner,
    sink: &'a mut dyn Write,
}

impl<'a> Orchestrator<'a> {
    pub fn new(engines: &'a mut dyn EngineRunner, sink: &'a mut dyn Write) -> Self {
        Self { engines, sink }
    }

    /// Validate, derive paths, run the stages, and clean up.
    ///
    /// Parameter errors return before any engine is invoked. Once the first
    /// engine has been called, cleanup runs on every path out of this
    /// function, including engine launch failures.
    pub fn run(&mut self, params: &RegistrationParams) -> crate::Result<PipelineResult> {
        params.validate()?;
        let mut paths = DerivedPaths::from_params(params)?;
        let registration = command::assemble_registration(params, &mut paths);
        if params.wants_displacement_field() && paths.reference_volume.is_none() {
            return Err(ParameterError::MissingReferenceVolume.into());
        }

        let outcome = self.run_stages(params, &paths, &registration);
        cleanup::clean_artifacts(&paths, params.keeps_composite());
        let status = outcome?;

        Ok(PipelineResult {
            status,
            composite_transform: paths.composite_transform,
            output_base: paths.output_base,
            reference_volume: paths.reference_volume,
            displacement_field: params.displacement_field().map(str::to_string),
            composite_kept: params.keeps_composite(),
        })
    }

    fn run_stages(
        &mut self,
        params: &RegistrationParams,
        paths: &DerivedPaths,
        registration: &command::CommandInvocation,
    ) -> crate::Result<PipelineStatus> {
        log::info!("registration stage");
        let status = registration.dispatch(self.engines, self.sink)?;
        if status != 0 {
            log::warn!("registration engine exited with status {}", status);
            return Ok(PipelineStatus::RegistrationFailed(status));
        }

        let field = match params.displacement_field() {
            Some(field) => field,
            None => return Ok(PipelineStatus::Success),
        };
        // Resolution was checked before the first stage ran.
        let reference = match paths.reference_volume.as_deref() {
            Some(reference) => reference,
            None => return Err(ParameterError::MissingReferenceVolume.into()),
        };

        self.emit_conversion_markers()?;
        log::info!("conversion stage");
        let apply = command::assemble_apply_transforms(&paths.composite_transform, reference, field);
        let status = apply.dispatch(self.engines, self.sink)?;
        if status != 0 {
            log::warn!("transform-application engine exited with status {}", status);
            return Ok(PipelineStatus::ConversionFailed(status));
        }
        Ok(PipelineStatus::Success)
    }

    fn emit_conversion_markers(&mut self) -> crate::Result<()> {
        writeln!(self.sink, "{}", CONVERSION_COMMENT)?;
        writeln!(self.sink, "{}", CONVERSION_PROGRESS)?;
        writeln!(self.sink, "{}", CONVERSION_STAGE_PROGRESS)?;
        Ok(())
    }
}
