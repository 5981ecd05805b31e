//! # Configuration Module
//!
//! Settings live in a `.devenvrc.json` at the project root, with a per-user
//! fallback under the platform config directory. Implicitly discovered files
//! are loaded leniently; a path given explicitly on the command line must
//! load and parse.

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub mod types;

pub use types::Config;

pub const CONFIG_FILE_NAME: &str = ".devenvrc.json";

/// Loads configuration, checking the explicit path, then the project
/// directory, then the user configuration directory.
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let project_config = project_root.join(CONFIG_FILE_NAME);
    if project_config.exists() {
        match load_config_file(&project_config) {
            Ok(config) => {
                log::debug!("Loaded configuration from {}", project_config.display());
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring {}: {}", project_config.display(), e),
        }
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            match load_config_file(&user_config) {
                Ok(config) => {
                    log::debug!("Loaded configuration from {}", user_config.display());
                    return Ok(config);
                }
                Err(e) => log::warn!("Ignoring {}: {}", user_config.display(), e),
            }
        }
    }

    Ok(Config::default())
}

/// Writes the configuration to the project's `.devenvrc.json`.
pub fn save_config(config: &Config, project_root: &Path) -> Result<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    let content = serde_json::to_string_pretty(config).map_err(|e| ConfigError::SaveFailed {
        reason: e.to_string(),
    })?;

    fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
        reason: format!("{}: {}", path.display(), e),
    })?;

    Ok(path)
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
        reason: format!("{}: {}", path.display(), e),
    })?;

    let config = serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
        reason: format!("{}: {}", path.display(), e),
    })?;

    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("devenv-bootstrap").join("config.json"))
}
