//! Configuration file discovery for the CLI
//!
//! This module finds and loads TOML configuration files from various
//! locations (explicit path, local directory, platform config
//! directory), falling back to defaults when none exists.

use std::path::Path;

use directories::ProjectDirs;
use log::{debug, info};

use dotgraph::config::{self, ConfigError, WriterConfig};

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided (missing file is an error)
/// 2. Local project directory (`dotgraph/config.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns [`ConfigError`] if an existing file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<WriterConfig, ConfigError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return config::load(path);
    }

    let local = Path::new("dotgraph").join("config.toml");
    if local.exists() {
        info!(path = local.display().to_string(); "Loading configuration from project directory");
        return config::load(&local);
    }

    if let Some(dirs) = ProjectDirs::from("", "", "dotgraph") {
        let platform = dirs.config_dir().join("config.toml");
        if platform.exists() {
            info!(path = platform.display().to_string(); "Loading configuration from platform directory");
            return config::load(&platform);
        }
    }

    debug!("No configuration file found; using defaults");
    Ok(WriterConfig::default())
}
