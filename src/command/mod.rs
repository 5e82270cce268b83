//! Assembly of the ordered argument lists the two engines expect.

pub mod template;

use std::io::Write;

use crate::engine::EngineRunner;
use crate::params::{filled, ApplyTransformsParams, RegistrationParams};
use crate::paths::DerivedPaths;

/// Identity of an external engine executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Registration,
    ApplyTransforms,
}

impl Engine {
    pub fn executable(&self) -> &'static str {
        match self {
            Engine::Registration => "antsRegistration",
            Engine::ApplyTransforms => "antsApplyTransforms",
        }
    }
}

/// Where the remainder of the registration argument list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentSource {
    /// Discrete caller-specified engine flags, forwarded as-is.
    Structured(Vec<String>),
    /// A free-form command string with `$` placeholders.
    Template(String),
}

impl Default for ArgumentSource {
    fn default() -> Self {
        ArgumentSource::Structured(Vec::new())
    }
}

/// An engine plus its ordered argument tokens. Order is significant; flags
/// and their values are positional pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub engine: Engine,
    pub args: Vec<String>,
}

impl CommandInvocation {
    pub fn dispatch(
        &self,
        runner: &mut dyn EngineRunner,
        sink: &mut dyn Write,
    ) -> crate::Result<i32> {
        match self.engine {
            Engine::Registration => runner.run_registration(&self.args, sink),
            Engine::ApplyTransforms => runner.run_apply_transforms(&self.args, sink),
        }
    }

    /// The command line as the engine sees it, for relaying to the caller.
    pub fn display(&self) -> String {
        format!("{} {}", self.engine.executable(), self.args.join(" "))
    }
}

/// Build the registration argument list. The sequence always starts with
/// `--output`, then the bare base path or the bracketed pair
/// `[outputBase,outputVolume]` when a final output volume was requested.
///
/// If no reference volume has been resolved yet, the assembled tokens are
/// scanned for a `--metric` argument to recover it from.
pub fn assemble_registration(
    params: &RegistrationParams,
    paths: &mut DerivedPaths,
) -> CommandInvocation {
    let mut args = vec!["--output".to_string()];
    if let Some(volume) = filled(&params.output_volume) {
        args.push(format!("[{},{}]", paths.output_base, volume));
    } else {
        args.push(paths.output_base.clone());
    }

    let rest = match &params.source {
        ArgumentSource::Structured(flags) => flags.clone(),
        ArgumentSource::Template(command) => {
            let substituted = template::substitute_placeholders(command, params, &paths.output_base);
            template::tokenize(&substituted)
        }
    };

    if paths.reference_volume.is_none() {
        paths.reference_volume = recover_reference_volume(&rest);
    }

    args.extend(rest);
    CommandInvocation {
        engine: Engine::Registration,
        args,
    }
}

/// The fixed argument sequence converting a composite transform into a dense
/// displacement field. Token order is part of the engine contract.
pub fn assemble_apply_transforms(
    composite_transform: &str,
    reference_volume: &str,
    displacement_field: &str,
) -> CommandInvocation {
    let args = vec![
        "--transform".to_string(),
        composite_transform.to_string(),
        "--reference-image".to_string(),
        reference_volume.to_string(),
        "--output".to_string(),
        format!("[{},1]", displacement_field),
        "--float".to_string(),
        "1".to_string(),
        "--verbose".to_string(),
        "1".to_string(),
    ];
    CommandInvocation {
        engine: Engine::ApplyTransforms,
        args,
    }
}

/// Map the standalone apply front-end surface onto the engine surface:
/// a displacement-field target becomes `--output [path,1]`, a transform file
/// becomes `--transform`, and verbose output is always requested.
pub fn assemble_apply_cli(params: &ApplyTransformsParams) -> CommandInvocation {
    let mut args = Vec::new();
    if let Some(reference) = filled(&params.reference_volume) {
        args.push("--reference-image".to_string());
        args.push(reference.to_string());
    }
    if let Some(transform) = params.transform_path() {
        args.push("--transform".to_string());
        args.push(transform.to_string());
    }
    if let Some(field) = filled(&params.output_displacement_field) {
        args.push("--output".to_string());
        args.push(format!("[{},1]", field));
    } else if let Some(volume) = filled(&params.output_volume) {
        args.push("--output".to_string());
        args.push(volume.to_string());
    }
    args.push("--verbose".to_string());
    args.push("1".to_string());
    CommandInvocation {
        engine: Engine::ApplyTransforms,
        args,
    }
}

/// Extract the fixed image from the first metric argument: the token right
/// after `--metric`, reading the field between the first `[` and the first
/// `,`.
fn recover_reference_volume(tokens: &[String]) -> Option<String> {
    let mut previous: Option<&str> = None;
    for token in tokens {
        if previous == Some("--metric") {
            if let Some(fixed) = template::metric_fixed_image(token) {
                return Some(fixed);
            }
        }
        previous = Some(token.as_str());
    }
    None
}
