//! Configuration module for search-proxy
//!
//! Settings come from an optional YAML file, with environment variables
//! applied on top. The resulting `Settings` is built once at startup and
//! passed explicitly to whatever needs it.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming a settings file
pub const SETTINGS_PATH_ENV: &str = "SEARCH_PROXY_SETTINGS_PATH";

/// Load settings from `explicit`, the environment or a default location,
/// then merge environment overrides
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match locate(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    Ok(settings)
}

fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    // An explicitly requested file must exist; let from_file report it.
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut candidates = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("search-proxy/settings.yml"));
    }

    candidates.into_iter().find(|p| p.exists())
}
