/// User settings
///
/// Read from `<config dir>/scripts-runner/config.toml`. Every section is
/// optional; a missing file means all defaults.

use crate::error::{Result, ScriptsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the scripts file looked for in every project
pub const DEFAULT_FILE_NAME: &str = ".scriptsrc";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub discovery: DiscoverySettings,
    #[serde(default)]
    pub watch: WatchSettings,
    #[serde(default)]
    pub run: RunSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    pub file_name: String,
    /// Subdirectories never treated as projects. Dot-directories are always skipped.
    pub skip_dirs: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            skip_dirs: vec!["node_modules".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Reload requests arriving within this window are merged into one reload
    pub debounce_ms: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Shell program to run scripts with instead of the detected one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl Settings {
    /// Load from the default location
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ScriptsError::io(path, e))?;
        toml::from_str(&content)
            .map_err(|e| ScriptsError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scripts-runner").join("config.toml"))
    }
}
