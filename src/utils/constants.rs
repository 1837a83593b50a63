//! Shared constants and invariants

/// Developer tokens are valid for six months.
pub const TOKEN_VALIDITY_DAYS: i64 = 180;

pub const APP_DIR_NAME: &str = "catalog-token-agent";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DATABASE_FILE_NAME: &str = "data.db";

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.music.apple.com";
pub const STOREFRONT_PATH: &str = "/v1/me/storefront";
pub const USER_TOKEN_HEADER: &str = "Music-User-Token";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

#[cfg(unix)]
pub const CREDENTIAL_FILE_MODE: u32 = 0o600;
#[cfg(unix)]
pub const CREDENTIAL_DIR_MODE: u32 = 0o700;
