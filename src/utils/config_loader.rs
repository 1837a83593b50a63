use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::proc_loader::file_to_config;
use crate::config::proc_validator::validate_app_config;
use crate::config::settings::default_config_path;
use crate::config::AppConfig;

/// Load the YAML config from `config_path`, or the per-user default location.
pub fn run(config_path: Option<&str>) -> Result<AppConfig> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);
    load(&path)
}

fn load(path: &Path) -> Result<AppConfig> {
    let config = file_to_config(path).with_context(|| format!("failed to load configuration '{}'", path.display()))?;
    validate_app_config(&config).context("configuration validation failed")?;
    Ok(config)
}
