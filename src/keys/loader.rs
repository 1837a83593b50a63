use std::fmt;
use std::fs;
use std::path::Path;

use jsonwebtoken::EncodingKey;
use pkcs8::der::SecretDocument;
use pkcs8::{ObjectIdentifier, PrivateKeyInfo};
use tracing::{debug, info};

use crate::error::{CredentialError, Result};

const PKCS8_PEM_LABEL: &str = "PRIVATE KEY";

const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const OID_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
const OID_X25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.110");

const OID_CURVE_P256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const OID_CURVE_P384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const OID_CURVE_P521: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");
const OID_CURVE_SECP256K1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");

/// Algorithm of a decoded PKCS#8 key. Only [`KeyAlgorithm::EcP256`] can sign ES256.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAlgorithm {
    EcP256,
    Ec { curve: Option<ObjectIdentifier> },
    Rsa,
    Ed25519,
    X25519,
    Other(ObjectIdentifier),
}

impl KeyAlgorithm {
    pub fn classify(info: &PrivateKeyInfo<'_>) -> Self {
        let oid = info.algorithm.oid;
        if oid == OID_EC_PUBLIC_KEY {
            match info.algorithm.parameters_oid().ok() {
                Some(curve) if curve == OID_CURVE_P256 => KeyAlgorithm::EcP256,
                curve => KeyAlgorithm::Ec { curve },
            }
        } else if oid == OID_RSA_ENCRYPTION {
            KeyAlgorithm::Rsa
        } else if oid == OID_ED25519 {
            KeyAlgorithm::Ed25519
        } else if oid == OID_X25519 {
            KeyAlgorithm::X25519
        } else {
            KeyAlgorithm::Other(oid)
        }
    }
}

fn curve_name(curve: &ObjectIdentifier) -> Option<&'static str> {
    [
        (OID_CURVE_P256, "P-256"),
        (OID_CURVE_P384, "P-384"),
        (OID_CURVE_P521, "P-521"),
        (OID_CURVE_SECP256K1, "secp256k1"),
    ]
    .into_iter()
    .find(|(oid, _)| oid == curve)
    .map(|(_, name)| name)
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::EcP256 => f.write_str("an EC P-256 key"),
            KeyAlgorithm::Ec { curve: Some(oid) } => match curve_name(oid) {
                Some(name) => write!(f, "an EC {} key", name),
                None => write!(f, "an EC key on curve {}", oid),
            },
            KeyAlgorithm::Ec { curve: None } => f.write_str("an EC key without named curve"),
            KeyAlgorithm::Rsa => f.write_str("an RSA key"),
            KeyAlgorithm::Ed25519 => f.write_str("an Ed25519 key"),
            KeyAlgorithm::X25519 => f.write_str("an X25519 key"),
            KeyAlgorithm::Other(oid) => write!(f, "a key with algorithm {}", oid),
        }
    }
}

/// EC P-256 private key ready for ES256 signing. Lives in memory only.
#[derive(Clone)]
pub struct EcSigningKey {
    encoding_key: EncodingKey,
}

impl EcSigningKey {
    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

impl fmt::Debug for EcSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcSigningKey").finish_non_exhaustive()
    }
}

/// Read a PKCS#8 PEM file and accept it only if it holds an EC P-256 key.
pub fn load_signing_key(path: &Path) -> Result<EcSigningKey> {
    let bytes = fs::read(path).map_err(|source| CredentialError::KeyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let key = parse_signing_key(path, &bytes)?;
    info!("private key loaded, path '{}'", path.display());
    Ok(key)
}

pub fn parse_signing_key(path: &Path, bytes: &[u8]) -> Result<EcSigningKey> {
    let format_err = |reason: String| CredentialError::KeyFormat {
        path: path.to_path_buf(),
        reason,
    };

    let pem = std::str::from_utf8(bytes).map_err(|_| format_err("file is not valid UTF-8 PEM".to_owned()))?;
    // the RFC 7468 decoder rejects blank lines after the END boundary
    let pem = format!("{}\n", pem.trim());
    let (label, document) = SecretDocument::from_pem(&pem).map_err(|e| format_err(e.to_string()))?;
    if label != PKCS8_PEM_LABEL {
        return Err(format_err(format!(
            "PEM block is '{}', expected '{}'",
            label, PKCS8_PEM_LABEL
        )));
    }

    let der = document.as_bytes();
    let key_info = PrivateKeyInfo::try_from(der).map_err(|e| format_err(e.to_string()))?;

    match KeyAlgorithm::classify(&key_info) {
        KeyAlgorithm::EcP256 => {
            debug!("private key '{}' is EC P-256", path.display());
            Ok(EcSigningKey {
                encoding_key: EncodingKey::from_ec_der(der),
            })
        }
        rejected => Err(CredentialError::KeyType {
            path: path.to_path_buf(),
            found: rejected.to_string(),
        }),
    }
}
