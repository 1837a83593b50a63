//! Credential lifecycle: mint and persist, then hand out only while unexpired.
//!
//! `Unauthenticated -> Valid -> Expired`. Only [`LifecycleManager::authenticate`]
//! leads back to `Valid`; nothing refreshes in the background.

pub mod context;
pub mod manager;
pub mod status;

pub use context::AuthorizedContext;
pub use manager::{CredentialSettings, LifecycleManager, UserTokenFlow};
pub use status::{AuthenticationStatus, StatusReport, TokenType};
