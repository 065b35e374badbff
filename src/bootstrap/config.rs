//! # Configuration Loader
//!
//! Reads the TOML file into [`AppConfig`]. Defaults live on the DTOs
//! themselves; this module only finds the file and reports I/O and parse
//! errors with context.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use wc_core::AppConfig;

/// `<config_dir>/wclip/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wclip").join("config.toml"))
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not a valid config
/// document.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// An explicit path must exist; the default location is optional and a
/// missing file there means "all defaults".
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => {
            debug!("No config file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}
