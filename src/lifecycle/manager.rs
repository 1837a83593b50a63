use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CredentialError, Result};
use crate::helpers::time;
use crate::keys::load_signing_key;
use crate::lifecycle::context::AuthorizedContext;
use crate::lifecycle::status::StatusReport;
use crate::store::{CredentialRecord, CredentialStore, Validity};
use crate::token::sign_developer_token;

/// Read-only inputs of the lifecycle, already validated by the configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSettings {
    pub issuer: String,
    pub key_id: String,
    pub private_key_path: PathBuf,
    pub storage_path: PathBuf,
}

/// How the user-scoped token gets issued.
///
/// Only the developer flow exists; the interactive user authorization that
/// would populate `user_token` is not built, so records never carry one
/// unless written by something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserTokenFlow {
    NotImplemented,
}

#[derive(Debug, Clone)]
pub struct LifecycleManager {
    settings: CredentialSettings,
    store: CredentialStore,
}

impl LifecycleManager {
    pub fn new(settings: CredentialSettings) -> Self {
        let store = CredentialStore::new(settings.storage_path.clone());
        Self { settings, store }
    }

    pub fn settings(&self) -> &CredentialSettings {
        &self.settings
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn user_token_flow(&self) -> UserTokenFlow {
        UserTokenFlow::NotImplemented
    }

    /// Mint a fresh developer token and overwrite whatever record is stored.
    pub fn authenticate(&self) -> Result<CredentialRecord> {
        self.authenticate_at(time::now())
    }

    pub fn authenticate_at(&self, now: DateTime<Utc>) -> Result<CredentialRecord> {
        let key = load_signing_key(&self.settings.private_key_path)?;
        let signed = sign_developer_token(&key, &self.settings.issuer, &self.settings.key_id, now)?;
        let record = CredentialRecord::from_signed(signed);
        self.store.save(&record)?;

        info!(
            "authenticated, kid '{}', developer token expires at {}",
            self.settings.key_id, record.expires_at
        );
        Ok(record)
    }

    /// Hand out bearer material if a stored record is still valid.
    pub fn authorized_context(&self) -> Result<AuthorizedContext> {
        self.authorized_context_at(Utc::now())
    }

    pub fn authorized_context_at(&self, now: DateTime<Utc>) -> Result<AuthorizedContext> {
        let record = self.store.load().map_err(|e| match e {
            CredentialError::NoCredential { path } => CredentialError::NotAuthenticated { path },
            other => other,
        })?;

        match record.validity_at(now) {
            Validity::Valid => Ok(AuthorizedContext::from_record(record)),
            Validity::Expired => {
                warn!("stored credential expired at {}", record.expires_at);
                Err(CredentialError::CredentialExpired {
                    expired_at: record.expires_at,
                })
            }
        }
    }

    /// Local status of the stored credential. An absent record is reported, not an error.
    pub fn describe_status(&self) -> Result<StatusReport> {
        self.describe_status_at(Utc::now())
    }

    pub fn describe_status_at(&self, now: DateTime<Utc>) -> Result<StatusReport> {
        let path = self.store.path().to_path_buf();
        match self.store.load() {
            Ok(record) => Ok(StatusReport::from_record(path, &record, now, self.user_token_flow())),
            Err(CredentialError::NoCredential { .. }) => {
                Ok(StatusReport::unauthenticated(path, self.user_token_flow()))
            }
            Err(e) => Err(e),
        }
    }
}
