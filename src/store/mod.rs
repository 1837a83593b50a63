pub mod credential_store;
pub mod record;

pub use credential_store::CredentialStore;
pub use record::{CredentialRecord, Validity};
