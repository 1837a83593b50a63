use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header};
use tracing::debug;

use crate::error::Result;
use crate::helpers::time::{token_validity, truncate_to_seconds};
use crate::keys::EcSigningKey;
use crate::token::claims::{DeveloperClaims, SignedToken};

pub const SIGNING_ALGORITHM: Algorithm = Algorithm::ES256;

/// Mint an ES256 developer token valid from `now` for the fixed window.
///
/// `kid` goes into the JOSE header, the claims carry only `iss`, `iat` and
/// `exp`. Both returned timestamps are whole seconds and equal the claims.
pub fn sign_developer_token(
    key: &EcSigningKey,
    issuer: &str,
    key_id: &str,
    now: DateTime<Utc>,
) -> Result<SignedToken> {
    let issued_at = truncate_to_seconds(now);
    let expires_at = issued_at + token_validity();

    let claims = DeveloperClaims {
        iss: issuer.to_owned(),
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
    };

    let mut header = Header::new(SIGNING_ALGORITHM);
    header.kid = Some(key_id.to_owned());

    let token = jsonwebtoken::encode(&header, &claims, key.encoding_key())?;
    debug!("developer token signed, kid '{}', iss '{}', exp {}", key_id, issuer, expires_at);

    Ok(SignedToken {
        token,
        issued_at,
        expires_at,
    })
}
