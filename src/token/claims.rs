use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims body of a developer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperClaims {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signed token plus the validity window it was minted with.
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Header and claims read back from a stored token, signature NOT checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenSummary {
    pub key_id: Option<String>,
    pub issuer: Option<String>,
}

/// Best-effort read of `kid` and `iss` for status output.
pub fn peek(token: &str) -> Option<TokenSummary> {
    let header = jsonwebtoken::decode_header(token).ok()?;
    let payload = token.split('.').nth(1)?;
    let raw = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: DeveloperClaims = serde_json::from_slice(&raw).ok()?;

    Some(TokenSummary {
        key_id: header.kid,
        issuer: Some(claims.iss),
    })
}
