use crate::core::cors::{CorsHeaders, OriginAllowlist};
use crate::models::{CreateUserRequest, Envelope, NewUser, UserRecord};
use crate::services::{ProviderError, SharedProvider};
use std::fmt::Display;
use std::future::Future;
use thiserror::Error;

pub const STATUS_NO_CONTENT: u16 = 204;
pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Request method as far as the gate cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Options,
    Post,
    Other,
}

impl RequestMethod {
    pub fn parse(method: &str) -> Self {
        match method {
            "OPTIONS" => RequestMethod::Options,
            "POST" => RequestMethod::Post,
            _ => RequestMethod::Other,
        }
    }
}

/// Transport-neutral view of an inbound request's head
///
/// The body is handed to [`Gate::handle`] separately, as a future that is
/// only awaited once the request has passed the preflight and authorization
/// stages.
#[derive(Debug, Clone, Copy)]
pub struct InboundRequest<'a> {
    pub method: RequestMethod,
    pub origin: Option<&'a str>,
    /// Raw `Authorization` value; only its presence is checked
    pub authorization: Option<&'a [u8]>,
}

/// Reasons a request stops short of a successful delegation
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Missing Authorization")]
    Unauthorized,

    #[error("{0}")]
    UnreadablePayload(String),

    #[error("{0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error(transparent)]
    Delegation(#[from] ProviderError),
}

impl GateError {
    pub fn status(&self) -> u16 {
        match self {
            GateError::Unauthorized => STATUS_UNAUTHORIZED,
            GateError::UnreadablePayload(_)
            | GateError::MalformedPayload(_)
            | GateError::Delegation(_) => STATUS_BAD_REQUEST,
        }
    }
}

/// Successful terminal states
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Preflight,
    Created(UserRecord),
}

/// Fully resolved response: status, CORS headers and optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct GateResponse {
    pub status: u16,
    pub cors: CorsHeaders,
    pub body: Option<Envelope>,
}

impl GateResponse {
    pub fn from_result(cors: CorsHeaders, result: Result<Outcome, GateError>) -> Self {
        let (status, body) = match result {
            Ok(Outcome::Preflight) => (STATUS_NO_CONTENT, None),
            Ok(Outcome::Created(user)) => (STATUS_OK, Some(Envelope::Data(user.into_inner()))),
            Err(e) => (e.status(), Some(Envelope::error(e.to_string()))),
        };

        Self { status, cors, body }
    }
}

/// The gated delegation pipeline
///
/// # Stages
/// 1. Origin resolution (always, feeds the CORS headers)
/// 2. Preflight short-circuit
/// 3. Authorization presence gate
/// 4. Body read, payload parse and delegation to the provider
///
/// Each stage either hands over to the next or ends in a terminal response.
/// The body is never touched before stage 4.
#[derive(Clone)]
pub struct Gate {
    allowlist: OriginAllowlist,
    provider: SharedProvider,
}

impl Gate {
    pub fn new(allowlist: OriginAllowlist, provider: SharedProvider) -> Self {
        Self {
            allowlist,
            provider,
        }
    }

    pub fn allowlist(&self) -> &OriginAllowlist {
        &self.allowlist
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Run a request through every stage and build its response
    ///
    /// `body` resolves to the raw request body; a read failure ends the
    /// request with a 400.
    pub async fn handle<F, B, E>(&self, req: &InboundRequest<'_>, body: F) -> GateResponse
    where
        F: Future<Output = Result<B, E>>,
        B: AsRef<[u8]>,
        E: Display,
    {
        let cors = CorsHeaders::resolve(&self.allowlist, req.origin);
        let result = self.evaluate(req, body).await;
        GateResponse::from_result(cors, result)
    }

    async fn evaluate<F, B, E>(&self, req: &InboundRequest<'_>, body: F) -> Result<Outcome, GateError>
    where
        F: Future<Output = Result<B, E>>,
        B: AsRef<[u8]>,
        E: Display,
    {
        if req.method == RequestMethod::Options {
            return Ok(Outcome::Preflight);
        }

        require_authorization(req.authorization)?;

        let body = body
            .await
            .map_err(|e| GateError::UnreadablePayload(e.to_string()))?;
        let payload: CreateUserRequest = serde_json::from_slice(body.as_ref())?;
        let user = NewUser::confirmed(payload.email, payload.password);

        let created = self.provider.create_user(&user).await?;

        Ok(Outcome::Created(created))
    }
}

/// Presence check only; the value is never verified or forwarded
pub fn require_authorization(value: Option<&[u8]>) -> Result<(), GateError> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(GateError::Unauthorized),
    }
}
