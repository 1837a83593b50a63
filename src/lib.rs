//! # Catalog Token Agent Library
//!
//! Issues ES256 developer tokens for a media catalog API, keeps the latest
//! one on disk, and hands it out only while it is still valid.
//!
//! Modules:
//! - `keys` — PKCS#8 PEM loading, EC P-256 only
//! - `token` — developer token claims and signing
//! - `store` — credential record and its single-file store
//! - `lifecycle` — authenticate / authorized context / status
//! - `config` — YAML configuration, defaults and validation
//! - `catalog` — storefront probe using the authorized context

pub mod catalog;
pub mod config;
pub mod error;
pub mod helpers;
pub mod keys;
pub mod lifecycle;
pub mod store;
pub mod token;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::config::AppConfig;
pub use crate::error::{CatalogError, ConfigError, CredentialError, Stage};
pub use crate::lifecycle::{AuthorizedContext, CredentialSettings, LifecycleManager, StatusReport};
pub use crate::store::{CredentialRecord, CredentialStore};
