use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body of every non-preflight gate response
///
/// Serializes as `{"data": ...}` or `{"error": "..."}`, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    Data(Value),
    Error(String),
}

impl Envelope {
    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error(_))
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
