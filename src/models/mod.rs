// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{NewUser, UserRecord};
pub use requests::CreateUserRequest;
pub use responses::{Envelope, HealthResponse};
