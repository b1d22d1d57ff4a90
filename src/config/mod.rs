//! Configuration module for research-agents
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Candidate settings locations, in lookup order
pub fn settings_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var("RESEARCH_SETTINGS_PATH") {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from("research.yml"));
    paths.push(PathBuf::from("config/research.yml"));
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("research-agents/research.yml"));
    }
    paths
}

/// Load settings from the first existing file or use defaults,
/// then apply environment overrides and validate
pub fn load() -> Result<Settings> {
    let mut settings = match settings_paths().into_iter().find(|p| p.exists()) {
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
    settings.validate()?;
    Ok(settings)
}
