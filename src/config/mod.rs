//! Configuration module for the portfolio API
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Load settings from an explicit file, the usual locations, or defaults.
///
/// Environment overrides are applied in every case. The file that was read,
/// if any, is kept in `Settings::source` so it can be logged once the
/// subscriber exists.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match locate(explicit) {
        Some(path) => {
            let mut settings = Settings::from_file(&path)?;
            settings.source = Some(path);
            settings
        }
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}

fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("PORTFOLIO_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/portfolio-api/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("portfolio-api/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}
