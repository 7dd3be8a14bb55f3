// Service exports
pub mod auth_admin;
pub mod provider;

pub use auth_admin::{extract_error_message, AuthAdminClient};
pub use provider::{IdentityProvider, ProviderError, SharedProvider};
