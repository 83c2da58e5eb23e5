//! Optional user settings for the bundle command.
//!
//! Settings live in `config.json` inside the ctxpack configuration directory
//! (see [`get_config_directory`]), or wherever `CTXPACK_CONFIG` points. The file
//! is never created automatically; a missing file simply means defaults.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::error::{CtxPackError, Result};
use crate::core::dirs::get_config_directory;

pub const CONFIG_ENV_VAR: &str = "CTXPACK_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Size ceiling in KB, overridden by `--max-file-size`
    pub max_file_size_kb: Option<u64>,
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    /// Non-empty switches extension filtering to allow-list mode
    pub include_extensions: Vec<String>,
    pub exclude_extensions: Vec<String>,
}

impl Settings {
    /// Load settings from `CTXPACK_CONFIG` or the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CtxPackError::input_read(path, e))?;
        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| CtxPackError::config_parse_failed(path, e))?;

        if !settings.include_extensions.is_empty() && !settings.exclude_extensions.is_empty() {
            return Err(CtxPackError::conflicting_extension_rules(path));
        }

        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        match get_config_directory() {
            Ok(dir) => Some(dir.join("config.json")),
            Err(e) => {
                log::debug!("Skipping config file: {e}");
                None
            }
        }
    }
}
