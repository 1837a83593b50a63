pub mod claims;
pub mod signer;

pub use claims::{DeveloperClaims, SignedToken, TokenSummary};
pub use signer::sign_developer_token;
