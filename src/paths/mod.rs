//! Derivation of the intermediate composite-transform path and its base name
//! from whichever output target the caller specified.

use lazy_static::lazy_static;
use serde::Serialize;

use crate::error::ParameterError;
use crate::params::{filled, RegistrationParams};

/// Trailing token of every composite transform the registration engine writes.
pub const COMPOSITE_ENDING: &str = "Composite.h5";

/// Trailing token of the auto-generated inverse side artifact.
pub const INVERSE_COMPOSITE_ENDING: &str = "InverseComposite.h5";

lazy_static! {
    /// Extensions rewritten by trailing trim, with their explicit lengths.
    /// Longest first so `.nii.gz` is matched before `.nii`.
    static ref SUFFIX_TRIM_EXTENSIONS: Vec<(&'static str, usize)> =
        vec![(".nii.gz", 7), (".nii", 4)];

    /// Extensions rewritten by replacing the token wherever it occurs.
    static ref TOKEN_EXTENSIONS: Vec<&'static str> = vec![".nrrd", ".mha"];
}

/// How a composite-transform path is derived from an output path.
///
/// Each supported extension is registered under exactly one policy; nothing
/// is inferred from extensions outside the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationStrategy {
    /// Replace a trailing extension of known character length, then trim the
    /// fixed ending to get the base.
    SuffixTrim { extension_len: usize },
    /// Replace the extension token anywhere in the path; remove the ending
    /// token wherever it occurs to get the base.
    TokenSubstitution { token: &'static str },
}

impl DerivationStrategy {
    /// Select the policy registered for the output path's extension.
    pub fn for_output(path: &str) -> Result<Self, ParameterError> {
        for (extension, len) in SUFFIX_TRIM_EXTENSIONS.iter() {
            if path.ends_with(extension) {
                return Ok(DerivationStrategy::SuffixTrim { extension_len: *len });
            }
        }
        for token in TOKEN_EXTENSIONS.iter().copied() {
            if path.ends_with(token) {
                return Ok(DerivationStrategy::TokenSubstitution { token });
            }
        }
        Err(ParameterError::UnrecognizedExtension(path.to_string()))
    }

    pub fn composite_path(&self, source: &str) -> String {
        match self {
            DerivationStrategy::SuffixTrim { extension_len } => {
                format!("{}{}", &source[..source.len() - extension_len], COMPOSITE_ENDING)
            }
            DerivationStrategy::TokenSubstitution { token } => {
                source.replace(token, COMPOSITE_ENDING)
            }
        }
    }

    pub fn base_path(&self, composite: &str) -> String {
        match self {
            DerivationStrategy::SuffixTrim { .. } => {
                composite[..composite.len() - COMPOSITE_ENDING.len()].to_string()
            }
            DerivationStrategy::TokenSubstitution { .. } => {
                composite.replace(COMPOSITE_ENDING, "")
            }
        }
    }
}

/// Paths computed once up front and shared by the assembler, the
/// orchestrator, and the artifact cleaner.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedPaths {
    /// Always non-empty once derivation succeeds.
    pub composite_transform: String,
    /// Composite path with the fixed trailing token removed.
    pub output_base: String,
    /// Resolved lazily: explicit parameter, the output volume, or recovered
    /// from the first metric argument during command assembly.
    pub reference_volume: Option<String>,
}

impl DerivedPaths {
    /// Derive from whichever output parameter is non-empty. Priority:
    /// explicit composite transform, then output volume, then displacement
    /// field.
    pub fn from_params(params: &RegistrationParams) -> Result<Self, ParameterError> {
        let reference_volume = filled(&params.reference_volume)
            .or_else(|| filled(&params.output_volume))
            .map(str::to_string);

        if let Some(composite) = filled(&params.output_composite_transform) {
            // An explicit composite path is taken verbatim; removing the
            // ending token yields the base the engine prefixes its outputs
            // with.
            return Ok(Self {
                composite_transform: composite.to_string(),
                output_base: composite.replace(COMPOSITE_ENDING, ""),
                reference_volume,
            });
        }

        let source = filled(&params.output_volume)
            .or_else(|| filled(&params.output_displacement_field))
            .ok_or(ParameterError::NoOutputRequested)?;
        let strategy = DerivationStrategy::for_output(source)?;
        let composite_transform = strategy.composite_path(source);
        let output_base = strategy.base_path(&composite_transform);
        Ok(Self {
            composite_transform,
            output_base,
            reference_volume,
        })
    }

    /// Path of the inverse composite the registration engine writes next to
    /// the composite transform.
    pub fn inverse_composite(&self) -> String {
        format!("{}{}", self.output_base, INVERSE_COMPOSITE_ENDING)
    }
}
