//! Typed failures of the credential lifecycle.
//!
//! Every variant belongs to exactly one [`Stage`], and its message starts with
//! that stage so a caller can tell key loading from signing from storage
//! without matching on the variant.

use std::fmt;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T, E = CredentialError> = std::result::Result<T, E>;

/// Where in the lifecycle a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    KeyLoading,
    Signing,
    StorageRead,
    Validity,
    StorageWrite,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Stage::KeyLoading => "key loading",
            Stage::Signing => "signing",
            Stage::StorageRead => "storage read",
            Stage::Validity => "validity check",
            Stage::StorageWrite => "storage write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("key loading: failed to read private key '{}': {source}", .path.display())]
    KeyRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("key loading: private key '{}' is not a PKCS#8 PEM key: {reason}", .path.display())]
    KeyFormat { path: PathBuf, reason: String },

    #[error("key loading: private key '{}' is {found}, expected an EC P-256 key", .path.display())]
    KeyType { path: PathBuf, found: String },

    #[error("signing: failed to sign developer token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("storage read: no credential stored at '{}', please authenticate first", .path.display())]
    NoCredential { path: PathBuf },

    #[error("storage read: not authenticated, no credential at '{}'", .path.display())]
    NotAuthenticated { path: PathBuf },

    #[error("storage read: failed to read credential file '{}': {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage read: credential file '{}' is corrupt: {reason}", .path.display())]
    CorruptCredential { path: PathBuf, reason: String },

    #[error("validity check: credential expired at {expired_at}, please authenticate again")]
    CredentialExpired { expired_at: DateTime<Utc> },

    #[error("storage write: {action} '{}': {source}", .path.display())]
    StorageWrite {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CredentialError {
    pub fn stage(&self) -> Stage {
        match self {
            CredentialError::KeyRead { .. }
            | CredentialError::KeyFormat { .. }
            | CredentialError::KeyType { .. } => Stage::KeyLoading,
            CredentialError::Signing(_) => Stage::Signing,
            CredentialError::NoCredential { .. }
            | CredentialError::NotAuthenticated { .. }
            | CredentialError::StorageRead { .. }
            | CredentialError::CorruptCredential { .. } => Stage::StorageRead,
            CredentialError::CredentialExpired { .. } => Stage::Validity,
            CredentialError::StorageWrite { .. } => Stage::StorageWrite,
        }
    }

    /// Expected conditions that running `auth` again resolves, as opposed to
    /// defects in the key, the stored file or the filesystem.
    pub fn requires_authentication(&self) -> bool {
        matches!(
            self,
            CredentialError::NoCredential { .. }
                | CredentialError::NotAuthenticated { .. }
                | CredentialError::CredentialExpired { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config is not valid, total errors: {}\n{}", .0.len(), .0.join("\n"))]
    Invalid(Vec<String>),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
