use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use crate::store::CredentialRecord;

/// Bearer material for the catalog client, handed out only for unexpired records.
#[derive(Debug)]
pub struct AuthorizedContext {
    developer_token: SecretString,
    user_token: Option<SecretString>,
    expires_at: DateTime<Utc>,
}

impl AuthorizedContext {
    pub(crate) fn from_record(record: CredentialRecord) -> Self {
        Self {
            developer_token: SecretString::from(record.developer_token),
            user_token: record.user_token.map(SecretString::from),
            expires_at: record.expires_at,
        }
    }

    pub fn developer_token(&self) -> &str {
        self.developer_token.expose_secret()
    }

    pub fn user_token(&self) -> Option<&str> {
        self.user_token.as_ref().map(|t| t.expose_secret())
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
