//! Configuration validation with aggregated errors.
//! - Collects every issue into one Vec<String> instead of stopping at the first
//! - Catalog credentials are only required before minting a token, so
//!   `validate_for_authentication` is separate from `validate_app_config`

use std::path::Path;

use tracing::{error, info};

use crate::config::settings::{AppConfig, CatalogConfig, LoggingConfig};
use crate::error::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Checks every command needs: storage, logging, base url.
pub fn validate_app_config(cfg: &AppConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    validate_common(cfg, &mut errors);
    finish(errors)
}

/// Everything `validate_app_config` checks plus the signing credentials.
pub fn validate_for_authentication(cfg: &AppConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    validate_common(cfg, &mut errors);
    validate_catalog_credentials(&cfg.catalog, &mut errors);
    finish(errors)
}

fn finish(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(ConfigError::Invalid(errors))
    }
}

fn validate_common(cfg: &AppConfig, errors: &mut Vec<String>) {
    if cfg.storage.database_path.trim().is_empty() {
        errors.push("storage.database_path cannot be empty".to_string());
    } else if Path::new(&cfg.storage.database_path).is_dir() {
        errors.push(format!(
            "storage.database_path '{}' is a directory, expected a file path",
            cfg.storage.database_path
        ));
    }

    let base_url = cfg.catalog.base_url.as_str();
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        errors.push(format!(
            "catalog.base_url '{}' must start with 'http://' or 'https://'",
            base_url
        ));
    }

    if let Some(logging) = &cfg.logging {
        validate_logging(logging, errors);
    }
}

fn validate_catalog_credentials(catalog: &CatalogConfig, errors: &mut Vec<String>) {
    if catalog.team_id.trim().is_empty() {
        errors.push("catalog.team_id is required".to_string());
    }
    if catalog.key_id.trim().is_empty() {
        errors.push("catalog.key_id is required".to_string());
    }
    if catalog.private_key_path.trim().is_empty() {
        errors.push("catalog.private_key_path is required".to_string());
    } else if !Path::new(&catalog.private_key_path).is_file() {
        errors.push(format!(
            "private key file not found: {}",
            catalog.private_key_path
        ));
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.level '{}' invalid; allowed: {:?}",
            logging.level, LOG_LEVELS
        ));
    }
}
