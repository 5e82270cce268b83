//! Tool configuration loaded from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Where the ANTs executables live.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Explicit installation directory; set, it skips discovery entirely.
    pub bin_dir: Option<PathBuf>,
    /// Extra directories probed first during discovery.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> crate::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load the given file, or fall back to defaults when none was named.
    pub fn load_or_default(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
