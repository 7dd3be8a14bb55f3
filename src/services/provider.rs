use crate::models::{NewUser, UserRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by an identity provider
///
/// `Display` yields the provider's own message so it can be handed back to the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ProviderError::Rejected {
            status,
            message: message.into(),
        }
    }
}

/// Administrative account management offered by a hosted identity provider
///
/// Implementations authenticate with their own service-level credential;
/// nothing supplied by the inbound caller is passed through.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account, returning the provider's user record
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ProviderError>;

    /// Short name used in logs
    fn provider_name(&self) -> &str;
}

/// Shared handle to the configured provider
pub type SharedProvider = Arc<dyn IdentityProvider>;
