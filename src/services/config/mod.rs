//! Loading of `config.toml` and environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::config::AppConfig;

pub const ENV_API_URL: &str = "ROADTRIP_API_URL";
pub const ENV_API_TOKEN: &str = "ROADTRIP_API_TOKEN";
pub const ENV_ROADTRIP_ID: &str = "ROADTRIP_ID";

const CONFIG_FILE_NAME: &str = "config.toml";
const DATABASE_FILE_NAME: &str = "planner.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "Roadtrip", "RoadtripPlanner")
}

/// Location of `config.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Location of the preferences database in the platform data directory.
pub fn default_database_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
}

/// Read a config file. A missing file yields the defaults.
pub fn load_from_path(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        log::info!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Overlay environment variables on top of file values.
pub fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = non_empty(ENV_API_URL) {
        config.api_base_url = url;
    }
    if let Some(token) = non_empty(ENV_API_TOKEN) {
        config.api_token = Some(token);
    }
    if let Some(roadtrip_id) = non_empty(ENV_ROADTRIP_ID) {
        config.roadtrip_id = roadtrip_id;
    }

    config
}

/// Load the effective configuration: file (if any), then environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let file_config = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_from_path(&path)?,
        None => {
            log::warn!("Could not resolve a config directory, using defaults");
            AppConfig::default()
        }
    };

    let config = apply_overrides(file_config, |key| std::env::var(key).ok());
    config
        .validate()
        .map_err(|err| anyhow!("Invalid configuration: {}", err))?;

    if config.roadtrip_id.is_empty() {
        log::warn!(
            "No roadtrip configured; set roadtrip_id in {} or {}",
            CONFIG_FILE_NAME,
            ENV_ROADTRIP_ID
        );
    }

    Ok(config)
}
