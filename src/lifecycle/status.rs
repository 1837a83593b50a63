use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::lifecycle::manager::UserTokenFlow;
use crate::store::{CredentialRecord, Validity};
use crate::token::claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationStatus {
    Unauthenticated,
    Valid,
    Expired,
}

impl From<Validity> for AuthenticationStatus {
    fn from(validity: Validity) -> Self {
        match validity {
            Validity::Valid => AuthenticationStatus::Valid,
            Validity::Expired => AuthenticationStatus::Expired,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    DeveloperToken,
    DeveloperAndUserToken,
}

/// Local view of the stored credential. Built without any network call.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub authentication_status: AuthenticationStatus,
    pub storage_path: PathBuf,
    pub user_token_flow: UserTokenFlow,
    pub has_user_token: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expires: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_age_seconds: Option<i64>,
    /// Negative once expired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl StatusReport {
    pub fn unauthenticated(storage_path: PathBuf, user_token_flow: UserTokenFlow) -> Self {
        Self {
            authentication_status: AuthenticationStatus::Unauthenticated,
            storage_path,
            user_token_flow,
            has_user_token: false,
            token_type: None,
            token_created: None,
            token_expires: None,
            token_age_seconds: None,
            expires_in_seconds: None,
            key_id: None,
            issuer: None,
        }
    }

    pub fn from_record(
        storage_path: PathBuf,
        record: &CredentialRecord,
        now: DateTime<Utc>,
        user_token_flow: UserTokenFlow,
    ) -> Self {
        let summary = claims::peek(&record.developer_token).unwrap_or_default();
        let token_type = if record.has_user_token() {
            TokenType::DeveloperAndUserToken
        } else {
            TokenType::DeveloperToken
        };

        Self {
            authentication_status: record.validity_at(now).into(),
            storage_path,
            user_token_flow,
            has_user_token: record.has_user_token(),
            token_type: Some(token_type),
            token_created: Some(record.created_at),
            token_expires: Some(record.expires_at),
            token_age_seconds: Some((now - record.created_at).num_seconds().max(0)),
            expires_in_seconds: Some((record.expires_at - now).num_seconds()),
            key_id: summary.key_id,
            issuer: summary.issuer,
        }
    }
}
