use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, error, info};

use crate::config::settings::{default_database_path, AppConfig, CatalogConfig, LoggingConfig};
use crate::error::ConfigError;

/// Load config from a YAML file. A missing file yields the defaults.
pub fn file_to_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("config file '{}' not found, using defaults", path.display());
            return Ok(apply_defaults(AppConfig::default()));
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let expanded = expand_env_vars(&content);
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_yaml::from_str(content).inspect_err(|e| {
        error!("parse config error: {}", e);
    })?;
    debug!("config parsed");
    Ok(apply_defaults(config))
}

fn apply_defaults(mut config: AppConfig) -> AppConfig {
    if config.logging.is_none() {
        config.logging = Some(LoggingConfig::default());
    }
    if config.storage.database_path.trim().is_empty() {
        config.storage.database_path = default_database_path().to_string_lossy().into_owned();
    }
    if config.catalog.base_url.trim().is_empty() {
        config.catalog.base_url = CatalogConfig::default_base_url();
    }
    config
}

/// `${VAR}` and `${VAR:default}` from the process environment.
pub fn expand_env_vars(input: &str) -> String {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| {
        Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("env var pattern is a valid regex")
    });
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
