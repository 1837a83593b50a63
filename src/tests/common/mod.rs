// tests/common/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation};

use crate::lifecycle::CredentialSettings;
use crate::token::DeveloperClaims;

pub const TEST_ISSUER: &str = "TEST123";
pub const TEST_KEY_ID: &str = "TESTKEY";

pub const EC_P256_PEM: &str = include_str!("../fixtures/ec_p256.p8");
pub const EC_P256_PUBLIC_PEM: &str = include_str!("../fixtures/ec_p256.pub.pem");
/// P-256 PKCS#8 envelope whose private key octets are not an ECPrivateKey.
pub const EC_P256_JUNK_BODY_PEM: &str = include_str!("../fixtures/ec_p256_junk_body.p8");
pub const EC_P256_SEC1_PEM: &str = include_str!("../fixtures/ec_p256_sec1.pem");
pub const EC_P384_PEM: &str = include_str!("../fixtures/ec_p384.p8");
pub const ED25519_PEM: &str = include_str!("../fixtures/ed25519.p8");
pub const RSA_PEM: &str = include_str!("../fixtures/rsa2048.p8");

pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Settings pointing at `key_path`, storing under a not-yet-existing subdirectory of `dir`.
pub fn test_settings(dir: &Path, key_path: PathBuf) -> CredentialSettings {
    CredentialSettings {
        issuer: TEST_ISSUER.to_owned(),
        key_id: TEST_KEY_ID.to_owned(),
        private_key_path: key_path,
        storage_path: dir.join("state").join("credentials.json"),
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).single().expect("valid date")
}

/// Verify a token against the fixture public key. Expiry is not checked.
pub fn decode_developer_token(token: &str) -> TokenData<DeveloperClaims> {
    let key = DecodingKey::from_ec_pem(EC_P256_PUBLIC_PEM.as_bytes()).expect("public key");
    let mut validation = Validation::new(Algorithm::ES256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    jsonwebtoken::decode::<DeveloperClaims>(token, &key, &validation).expect("token verifies")
}

#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).expect("metadata").permissions().mode() & 0o777
}
