//! Flat parameter sets for the two front-ends, with presence and
//! mutual-exclusivity validation.

use crate::command::ArgumentSource;
use crate::error::ParameterError;

/// Size of the indexed input-volume family (`$inputVolume01`..`$inputVolume11`).
pub const MAX_INPUT_VOLUMES: usize = 11;

/// Treat an unset or empty string parameter as absent.
pub fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Which outputs the caller asked the registration pipeline to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSpec {
    Volume,
    CompositeTransform,
    DisplacementField,
    VolumeAndDisplacement,
    CompositeAndDisplacement,
}

/// Parameters of the registration pipeline.
#[derive(Debug, Clone, Default)]
pub struct RegistrationParams {
    pub reference_volume: Option<String>,
    pub output_volume: Option<String>,
    pub output_composite_transform: Option<String>,
    pub output_displacement_field: Option<String>,
    pub input_transform: Option<String>,
    pub input_volumes: Vec<String>,
    pub source: ArgumentSource,
}

impl RegistrationParams {
    /// Parameters whose engine arguments come from discrete forwarded flags.
    pub fn structured(args: Vec<String>) -> Self {
        Self {
            source: ArgumentSource::Structured(args),
            ..Self::default()
        }
    }

    /// Parameters whose engine arguments come from a command template.
    pub fn template(command: impl Into<String>) -> Self {
        Self {
            source: ArgumentSource::Template(command.into()),
            ..Self::default()
        }
    }

    pub fn with_reference_volume(mut self, path: impl Into<String>) -> Self {
        self.reference_volume = Some(path.into());
        self
    }

    pub fn with_output_volume(mut self, path: impl Into<String>) -> Self {
        self.output_volume = Some(path.into());
        self
    }

    pub fn with_output_composite_transform(mut self, path: impl Into<String>) -> Self {
        self.output_composite_transform = Some(path.into());
        self
    }

    pub fn with_output_displacement_field(mut self, path: impl Into<String>) -> Self {
        self.output_displacement_field = Some(path.into());
        self
    }

    pub fn with_input_transform(mut self, path: impl Into<String>) -> Self {
        self.input_transform = Some(path.into());
        self
    }

    pub fn with_input_volume(mut self, path: impl Into<String>) -> Self {
        self.input_volumes.push(path.into());
        self
    }

    /// The caller asked for the composite transform as a kept output.
    pub fn keeps_composite(&self) -> bool {
        filled(&self.output_composite_transform).is_some()
    }

    pub fn displacement_field(&self) -> Option<&str> {
        filled(&self.output_displacement_field)
    }

    pub fn wants_displacement_field(&self) -> bool {
        self.displacement_field().is_some()
    }

    /// Classify the requested outputs, rejecting combinations that are not a
    /// supported variant.
    pub fn output_spec(&self) -> Result<OutputSpec, ParameterError> {
        let volume = filled(&self.output_volume);
        let composite = filled(&self.output_composite_transform);
        let field = filled(&self.output_displacement_field);
        match (volume, composite, field) {
            (None, None, None) => Err(ParameterError::NoOutputRequested),
            (Some(_), None, None) => Ok(OutputSpec::Volume),
            (None, Some(_), None) => Ok(OutputSpec::CompositeTransform),
            (None, None, Some(_)) => Ok(OutputSpec::DisplacementField),
            (Some(_), None, Some(_)) => Ok(OutputSpec::VolumeAndDisplacement),
            (None, Some(_), Some(_)) => Ok(OutputSpec::CompositeAndDisplacement),
            (Some(_), Some(_), _) => Err(ParameterError::ExclusiveVolumeAndTransform),
        }
    }

    /// Fails without side effects; engines are never invoked on error.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let spec = self.output_spec()?;
        // The structured front-end keeps the stricter legacy rule: the
        // composite transform and the displacement field are exclusive there.
        if matches!(self.source, ArgumentSource::Structured(_))
            && spec == OutputSpec::CompositeAndDisplacement
        {
            return Err(ParameterError::ExclusiveTransformTargets);
        }
        if self.input_volumes.len() > MAX_INPUT_VOLUMES {
            return Err(ParameterError::TooManyInputVolumes {
                max: MAX_INPUT_VOLUMES,
                got: self.input_volumes.len(),
            });
        }
        Ok(())
    }
}

/// Parameters of the standalone transform-application front-end.
#[derive(Debug, Clone, Default)]
pub struct ApplyTransformsParams {
    pub reference_volume: Option<String>,
    pub transform: Option<String>,
    pub transform_file: Option<String>,
    pub output_volume: Option<String>,
    pub output_displacement_field: Option<String>,
}

impl ApplyTransformsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_volume(mut self, path: impl Into<String>) -> Self {
        self.reference_volume = Some(path.into());
        self
    }

    pub fn with_transform(mut self, path: impl Into<String>) -> Self {
        self.transform = Some(path.into());
        self
    }

    pub fn with_transform_file(mut self, path: impl Into<String>) -> Self {
        self.transform_file = Some(path.into());
        self
    }

    pub fn with_output_volume(mut self, path: impl Into<String>) -> Self {
        self.output_volume = Some(path.into());
        self
    }

    pub fn with_output_displacement_field(mut self, path: impl Into<String>) -> Self {
        self.output_displacement_field = Some(path.into());
        self
    }

    /// The transform input, whichever of the two exclusive parameters holds it.
    pub fn transform_path(&self) -> Option<&str> {
        filled(&self.transform).or_else(|| filled(&self.transform_file))
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if filled(&self.reference_volume).is_none() {
            return Err(ParameterError::MissingReferenceVolume);
        }
        let transform = filled(&self.transform);
        let transform_file = filled(&self.transform_file);
        if transform.is_none() && transform_file.is_none() {
            return Err(ParameterError::MissingTransform);
        }
        if transform.is_some() && transform_file.is_some() {
            return Err(ParameterError::AmbiguousTransform);
        }
        let volume = filled(&self.output_volume);
        let field = filled(&self.output_displacement_field);
        if volume.is_some() && field.is_some() {
            return Err(ParameterError::ExclusiveVolumeAndTransform);
        }
        if volume.is_none() && field.is_none() {
            return Err(ParameterError::NoOutputRequested);
        }
        Ok(())
    }
}
