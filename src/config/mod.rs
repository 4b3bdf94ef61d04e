//! Configuration module for Coffee Finder
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Locations searched for a settings file, in order
pub fn default_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/coffee-finder/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("coffee-finder/settings.yml"))
            .unwrap_or_default(),
    ]
}

/// Load settings from file or use defaults, then apply environment overrides
pub fn load() -> Result<Settings> {
    if let Ok(path) = std::env::var("COFFEE_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    for path in default_paths().iter() {
        if path.is_file() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
