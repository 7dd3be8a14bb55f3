use crate::models::{NewUser, UserRecord};
use crate::services::provider::{IdentityProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Fields checked, in order, for a human-readable message in an error body
const MESSAGE_FIELDS: [&str; 4] = ["msg", "message", "error_description", "error"];

/// Admin API client for a hosted GoTrue-style auth service
///
/// Every call authenticates with the service-role key held by the client.
pub struct AuthAdminClient {
    base_url: String,
    service_role_key: String,
    client: Client,
}

impl AuthAdminClient {
    /// Create a new admin client
    ///
    /// `timeout` bounds each provider call at the transport level; `None`
    /// leaves calls unbounded.
    pub fn new(
        base_url: String,
        service_role_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            base_url,
            service_role_key,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/auth/v1/admin/users", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for AuthAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthAdminClient")
            .field("base_url", &self.base_url)
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl IdentityProvider for AuthAdminClient {
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ProviderError> {
        let url = self.users_url();

        tracing::debug!("Creating user via {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(user)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &body);
            tracing::debug!("Provider rejected create user: {} - {}", status, message);
            return Err(ProviderError::rejected(status.as_u16(), message));
        }

        let created: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse user: {}", e)))?;

        if !created.is_object() {
            return Err(ProviderError::InvalidResponse(
                "Expected a user object".to_string(),
            ));
        }

        Ok(UserRecord(json!({ "user": created })))
    }

    fn provider_name(&self) -> &str {
        "auth-admin"
    }
}

/// Pull the human-readable message out of a provider error body
///
/// Falls back to the status code and raw body when no known field is present.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let found = parsed.as_ref().and_then(|json| {
        MESSAGE_FIELDS
            .iter()
            .filter_map(|field| json.get(field).and_then(Value::as_str))
            .find(|message| !message.is_empty())
    });

    match found {
        Some(message) => message.to_string(),
        None if body.trim().is_empty() => format!("Provider returned status {}", status),
        None => format!("{}: {}", status, body.trim()),
    }
}
