use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use ants_pipeline::command;
use ants_pipeline::config::Config;
use ants_pipeline::{
    AntsToolchain, ApplyTransformsParams, ArgumentSource, Engine, Orchestrator, PipelineError,
    RegistrationParams,
};

#[derive(Parser)]
#[command(name = "antsrun")]
#[command(about = "Command-line orchestration for ANTs image registration and transform application")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Tool configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// ANTs installation directory (overrides config and discovery)
    #[arg(long)]
    ants_bin_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a registration and collect the requested output artifacts
    Register {
        /// Final aligned output volume
        #[arg(long)]
        output_volume: Option<String>,

        /// Keep the composite transform at this path
        #[arg(long)]
        output_composite_transform: Option<String>,

        /// Convert the composite transform to a dense displacement field
        #[arg(long)]
        output_displacement_field: Option<String>,

        /// Reference volume for the displacement-field conversion
        #[arg(long)]
        reference_volume: Option<String>,

        /// Free-form registration command template with $ placeholders
        #[arg(long)]
        ants_command: Option<String>,

        /// Initial transform substituted for $inputTransform
        #[arg(long)]
        input_transform: Option<String>,

        /// Input volumes substituted for $inputVolume01..$inputVolume11, in order
        #[arg(long = "input-volume")]
        input_volumes: Vec<String>,

        /// Write a JSON run report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Discrete registration-engine arguments, forwarded as-is
        #[arg(last = true)]
        engine_args: Vec<String>,
    },

    /// Resample an image or convert a transform with the apply-transforms engine
    ApplyTransform {
        /// Reference volume defining the output grid
        #[arg(long)]
        reference_volume: Option<String>,

        /// Transform to apply
        #[arg(long)]
        transform: Option<String>,

        /// Transform file to apply
        #[arg(long)]
        transform_file: Option<String>,

        /// Resampled output volume
        #[arg(long)]
        output_volume: Option<String>,

        /// Output displacement field
        #[arg(long)]
        output_displacement_field: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let config = Config::load_or_default(cli.config.as_deref())?;
    let toolchain = match cli.ants_bin_dir.or(config.engine.bin_dir) {
        Some(dir) => AntsToolchain::with_bin_dir(dir),
        None => AntsToolchain::discover(&config.engine.search_paths),
    };

    let code = match cli.command {
        Commands::Register {
            output_volume,
            output_composite_transform,
            output_displacement_field,
            reference_volume,
            ants_command,
            input_transform,
            input_volumes,
            report,
            engine_args,
        } => {
            let source = match ants_command.filter(|c| !c.is_empty()) {
                Some(command) => {
                    if !engine_args.is_empty() {
                        log::warn!("ignoring trailing engine arguments, command template given");
                    }
                    ArgumentSource::Template(command)
                }
                None => ArgumentSource::Structured(engine_args),
            };
            let params = RegistrationParams {
                reference_volume,
                output_volume,
                output_composite_transform,
                output_displacement_field,
                input_transform,
                input_volumes,
                source,
            };
            handle_register(params, toolchain, report)?
        }
        Commands::ApplyTransform {
            reference_volume,
            transform,
            transform_file,
            output_volume,
            output_displacement_field,
        } => {
            let params = ApplyTransformsParams {
                reference_volume,
                transform,
                transform_file,
                output_volume,
                output_displacement_field,
            };
            handle_apply_transform(params, toolchain)?
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn handle_register(
    params: RegistrationParams,
    mut toolchain: AntsToolchain,
    report: Option<PathBuf>,
) -> anyhow::Result<i32> {
    let mut stdout = io::stdout();
    let result = Orchestrator::new(&mut toolchain, &mut stdout).run(&params)?;

    if let Some(report_path) = report {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(&report_path, json)?;
        log::info!("run report written to {}", report_path.display());
    }

    Ok(result.status.exit_code())
}

fn handle_apply_transform(
    params: ApplyTransformsParams,
    mut toolchain: AntsToolchain,
) -> anyhow::Result<i32> {
    params.validate()?;
    let invocation = command::assemble_apply_cli(&params);

    let mut stdout = io::stdout();
    // Echo the assembled command so callers can see what the engine ran.
    writeln!(stdout, "{}", invocation.display())?;

    let status = invocation.dispatch(&mut toolchain, &mut stdout)?;
    if status != 0 {
        return Err(PipelineError::EngineFailure {
            engine: Engine::ApplyTransforms.executable(),
            status,
        }
        .into());
    }
    Ok(0)
}
