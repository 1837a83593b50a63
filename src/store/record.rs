use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::token::SignedToken;

/// Persisted unit of trust: bearer token(s) and their validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub developer_token: String,
    /// User-scoped token layered on the developer token. Never issued by the
    /// developer flow, see [`crate::lifecycle::UserTokenFlow`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Usable lifetime of a stored credential at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    Valid,
    Expired,
}

impl CredentialRecord {
    pub fn from_signed(signed: SignedToken) -> Self {
        Self {
            developer_token: signed.token,
            user_token: None,
            expires_at: signed.expires_at,
            created_at: signed.issued_at,
        }
    }

    pub fn validity_at(&self, now: DateTime<Utc>) -> Validity {
        if now < self.expires_at {
            Validity::Valid
        } else {
            Validity::Expired
        }
    }

    pub fn has_user_token(&self) -> bool {
        self.user_token.is_some()
    }

    /// Structural invariants a record read from disk must satisfy.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.developer_token.is_empty() {
            return Err("developer_token is empty".to_owned());
        }
        if self.expires_at <= self.created_at {
            return Err(format!(
                "expires_at ({}) is not after created_at ({})",
                self.expires_at, self.created_at
            ));
        }
        Ok(())
    }

    /// Stored empty user tokens mean "absent".
    pub(crate) fn normalize(mut self) -> Self {
        if self.user_token.as_deref().is_some_and(str::is_empty) {
            self.user_token = None;
        }
        self
    }
}
