// Unit tests for Signup Gate

use signup_gate::core::cors::{ALLOW_HEADERS_HEADER, ALLOW_METHODS_HEADER, ALLOW_ORIGIN_HEADER};
use signup_gate::core::gate::require_authorization;
use signup_gate::models::{CreateUserRequest, Envelope};
use signup_gate::services::extract_error_message;
use signup_gate::{CorsHeaders, GateError, OriginAllowlist, ProviderError};

fn allowlist() -> OriginAllowlist {
    OriginAllowlist::new([
        "https://dashboard.example.com",
        "https://staging.dashboard.example.com",
        "http://localhost:3000",
    ])
}

#[test]
fn test_every_allowlisted_origin_is_echoed() {
    let list = allowlist();
    for origin in list.iter() {
        let cors = CorsHeaders::resolve(&list, Some(origin));
        assert_eq!(cors.allow_origin(), origin);
    }
}

#[test]
fn test_foreign_origins_get_empty_header() {
    let list = allowlist();
    for origin in [
        Some("https://evil.example.com"),
        Some("http://localhost:3001"),
        Some("https://dashboard.example.com.evil.net"),
        Some("null"),
        Some(""),
        None,
    ] {
        let cors = CorsHeaders::resolve(&list, origin);
        let (name, value) = cors.pairs()[0];
        assert_eq!(name, ALLOW_ORIGIN_HEADER);
        assert_eq!(value, "", "origin {:?} should not be allowed", origin);
    }
}

#[test]
fn test_header_triplet_is_constant_shape() {
    let list = allowlist();
    let allowed = CorsHeaders::resolve(&list, Some("http://localhost:3000"));
    let denied = CorsHeaders::resolve(&list, None);

    let names = |c: &CorsHeaders| c.pairs().iter().map(|(n, _)| *n).collect::<Vec<_>>();
    assert_eq!(names(&allowed), names(&denied));
    assert_eq!(
        names(&allowed),
        vec![ALLOW_ORIGIN_HEADER, ALLOW_METHODS_HEADER, ALLOW_HEADERS_HEADER]
    );
}

#[test]
fn test_authorization_presence() {
    assert!(require_authorization(Some(&b"Bearer token"[..])).is_ok());
    assert!(require_authorization(Some(&b"x"[..])).is_ok());
    assert!(matches!(require_authorization(Some(&b""[..])), Err(GateError::Unauthorized)));
    assert!(matches!(require_authorization(None), Err(GateError::Unauthorized)));
}

#[test]
fn test_gate_error_statuses() {
    assert_eq!(GateError::Unauthorized.status(), 401);
    assert_eq!(GateError::Unauthorized.to_string(), "Missing Authorization");

    let parse_err = serde_json::from_str::<CreateUserRequest>("{").unwrap_err();
    let err = GateError::from(parse_err);
    assert_eq!(err.status(), 400);
    assert!(!err.to_string().is_empty());

    let err = GateError::from(ProviderError::rejected(422, "Email already exists"));
    assert_eq!(err.status(), 400);
    assert_eq!(err.to_string(), "Email already exists");
}

#[test]
fn test_create_user_request_is_permissive() {
    let req: CreateUserRequest = serde_json::from_str(r#"{"email":"a@b.test"}"#).unwrap();
    assert_eq!(req.email.as_deref(), Some("a@b.test"));
    assert!(req.password.is_none());

    let req: CreateUserRequest = serde_json::from_str(r#"{"extra":1}"#).unwrap();
    assert!(req.email.is_none());

    assert!(serde_json::from_str::<CreateUserRequest>(r#"{"email":42}"#).is_err());
    assert!(serde_json::from_str::<CreateUserRequest>("").is_err());
}

#[test]
fn test_envelope_has_single_key() {
    for envelope in [Envelope::Data(serde_json::json!({})), Envelope::error("boom")] {
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
    }
}

#[test]
fn test_provider_message_extraction() {
    assert_eq!(
        extract_error_message(400, r#"{"message":"Email already exists"}"#),
        "Email already exists"
    );
    assert_eq!(
        extract_error_message(400, r#"{"msg":"","message":"Signup requires a valid password"}"#),
        "Signup requires a valid password"
    );
}
