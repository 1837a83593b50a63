use std::path::PathBuf;

use serde::Deserialize;

use crate::lifecycle::CredentialSettings;
use crate::utils::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, DATABASE_FILE_NAME, DEFAULT_CATALOG_BASE_URL};

/// ================================
/// Full application configuration
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default, alias = "apple_music")]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Catalog API credentials
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// issuer of developer tokens
    #[serde(default)]
    pub team_id: String,
    /// `kid` header of developer tokens
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub private_key_path: String,
    #[serde(default = "CatalogConfig::default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub database_path: String,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl CatalogConfig {
    pub fn default_base_url() -> String {
        DEFAULT_CATALOG_BASE_URL.to_owned()
    }
}

impl AppConfig {
    /// The subset of configuration the credential lifecycle consumes.
    pub fn credential_settings(&self) -> CredentialSettings {
        CredentialSettings {
            issuer: self.catalog.team_id.to_owned(),
            key_id: self.catalog.key_id.to_owned(),
            private_key_path: PathBuf::from(&self.catalog.private_key_path),
            storage_path: PathBuf::from(&self.storage.database_path),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DATABASE_FILE_NAME)
}

