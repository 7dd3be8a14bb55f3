//! Signup Gate - gated delegation endpoint for account creation
//!
//! Applies a CORS allowlist and an authorization presence check to inbound
//! requests, then creates an email-confirmed account through a hosted identity
//! provider's admin API using a service-level credential.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{CorsHeaders, Gate, GateError, GateResponse, InboundRequest, OriginAllowlist, RequestMethod};
pub use models::{CreateUserRequest, Envelope, NewUser, UserRecord};
pub use services::{AuthAdminClient, IdentityProvider, ProviderError, SharedProvider};
