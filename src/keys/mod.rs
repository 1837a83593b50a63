pub mod loader;

pub use loader::{load_signing_key, EcSigningKey, KeyAlgorithm};
