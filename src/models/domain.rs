use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account creation command sent to the identity provider
///
/// `email` and `password` pass through exactly as the caller supplied them;
/// absent fields are left for the provider to reject.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub email_confirm: bool,
}

impl NewUser {
    /// Build a command for an account whose email is already confirmed
    pub fn confirmed(email: Option<String>, password: Option<String>) -> Self {
        Self {
            email,
            password,
            email_confirm: true,
        }
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email_confirm", &self.email_confirm)
            .finish()
    }
}

/// Opaque record returned by the provider on success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub Value);

impl UserRecord {
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for UserRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_sets_flag() {
        let user = NewUser::confirmed(Some("a@b.test".into()), Some("hunter22".into()));
        assert!(user.email_confirm);
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let user = NewUser::confirmed(None, None);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "email_confirm": true }));
    }

    #[test]
    fn test_debug_hides_password() {
        let user = NewUser::confirmed(Some("a@b.test".into()), Some("hunter22".into()));
        let printed = format!("{:?}", user);
        assert!(!printed.contains("hunter22"));
        assert!(printed.contains("a@b.test"));
    }
}
