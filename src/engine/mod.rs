//! External engine collaborators: the seam the orchestrator calls through,
//! and the implementation that spawns the real ANTs executables.

use std::env;
use std::ffi::OsString;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context;

use crate::command::Engine;
use crate::error::PipelineError;

/// Seam between the orchestrator and the external numerical engines. Both
/// calls are synchronous and blocking; a zero status means success.
pub trait EngineRunner {
    fn run_registration(&mut self, args: &[String], sink: &mut dyn Write) -> crate::Result<i32>;
    fn run_apply_transforms(&mut self, args: &[String], sink: &mut dyn Write)
        -> crate::Result<i32>;
}

/// Installation directories probed relative to the running executable.
const RELATIVE_CANDIDATES: &[&str] = &["..", "../bin", "../../bin", "../../../bin"];

/// Locates and runs the ANTs executables.
///
/// With no explicit directory the usual installation layouts next to the
/// running executable are probed; when none matches, the executables are
/// expected on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct AntsToolchain {
    bin_dir: Option<PathBuf>,
}

impl AntsToolchain {
    /// Use an explicit ANTs installation directory.
    pub fn with_bin_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: Some(dir.into()),
        }
    }

    /// Probe `extra` directories first, then the built-in candidates.
    pub fn discover(extra: &[PathBuf]) -> Self {
        let registration = executable_name(Engine::Registration.executable());
        for candidate in Self::candidate_dirs(extra) {
            if candidate.join(&registration).is_file() {
                log::debug!("found ANTs executables in {}", candidate.display());
                return Self {
                    bin_dir: Some(candidate),
                };
            }
        }
        Self { bin_dir: None }
    }

    fn candidate_dirs(extra: &[PathBuf]) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = extra.to_vec();
        if let Ok(exe) = env::current_exe() {
            if let Some(exe_dir) = exe.parent() {
                for relative in RELATIVE_CANDIDATES {
                    candidates.push(exe_dir.join(relative));
                }
            }
        }
        candidates
    }

    fn run(&self, engine: Engine, args: &[String], sink: &mut dyn Write) -> crate::Result<i32> {
        let executable = executable_name(engine.executable());
        let program = match &self.bin_dir {
            Some(dir) => dir.join(&executable),
            None => PathBuf::from(&executable),
        };
        log::info!("{} {}", engine.executable(), args.join(" "));

        let mut command = Command::new(&program);
        command.args(args).stdout(Stdio::piped());
        if let Some(dir) = &self.bin_dir {
            command.env("PATH", prepend_to_path(dir));
        }
        let mut child = command.spawn().map_err(|source| PipelineError::EngineLaunch {
            engine: engine.executable().to_string(),
            source,
        })?;

        // Relay engine output line by line as it is produced.
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line.context("error reading engine output")?;
                writeln!(sink, "{}", line)?;
            }
        }
        let status = child
            .wait()
            .with_context(|| format!("failed to wait for {}", engine.executable()))?;
        // A signal-terminated child carries no code; report it as a failure.
        Ok(status.code().unwrap_or(1))
    }
}

impl EngineRunner for AntsToolchain {
    fn run_registration(&mut self, args: &[String], sink: &mut dyn Write) -> crate::Result<i32> {
        self.run(Engine::Registration, args, sink)
    }

    fn run_apply_transforms(
        &mut self,
        args: &[String],
        sink: &mut dyn Write,
    ) -> crate::Result<i32> {
        self.run(Engine::ApplyTransforms, args, sink)
    }
}

fn executable_name(base: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", base)
    } else {
        base.to_string()
    }
}

fn prepend_to_path(dir: &Path) -> OsString {
    match env::var_os("PATH") {
        Some(path) => {
            let mut entries = vec![dir.to_path_buf()];
            entries.extend(env::split_paths(&path));
            env::join_paths(entries).unwrap_or(path)
        }
        None => dir.as_os_str().to_os_string(),
    }
}
