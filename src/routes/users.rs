use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::Instrument;

use crate::core::gate::{STATUS_NO_CONTENT, STATUS_OK};
use crate::core::{GateResponse, InboundRequest, RequestMethod};
use crate::routes::AppState;

/// Gated create-user endpoint
///
/// Answers any method on any path. The body stream is left untouched until
/// the request has cleared the preflight and authorization stages, then read
/// up to the configured limit.
///
/// Request body:
/// ```json
/// {
///   "email": "string",
///   "password": "string"
/// }
/// ```
pub async fn create_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> HttpResponse {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.as_bytes());

    let inbound = InboundRequest {
        method: RequestMethod::parse(req.method().as_str()),
        origin,
        authorization,
    };
    let body = read_body(payload, state.body_limit);

    let span = tracing::info_span!(
        "create_user",
        request_id = %uuid::Uuid::new_v4(),
        method = %req.method(),
        origin = origin.unwrap_or(""),
    );

    let response = state.gate.handle(&inbound, body).instrument(span.clone()).await;

    span.in_scope(|| log_outcome(&response, state.gate.provider_name()));

    into_http_response(response)
}

/// Buffer the request body, refusing anything larger than `limit`
async fn read_body(payload: web::Payload, limit: usize) -> Result<web::Bytes, String> {
    match payload.to_bytes_limited(limit).await {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => Err(format!("Failed to read request body: {}", e)),
        Err(_) => Err(format!("Request body exceeds {} bytes", limit)),
    }
}

fn log_outcome(response: &GateResponse, provider: &str) {
    let allowed = response.cors.is_allowed();
    match response.status {
        STATUS_OK => tracing::info!("User created via {} (origin allowed: {})", provider, allowed),
        STATUS_NO_CONTENT => tracing::debug!("Preflight answered (origin allowed: {})", allowed),
        status => {
            let message = match &response.body {
                Some(crate::models::Envelope::Error(message)) => message.as_str(),
                _ => "",
            };
            tracing::warn!("Create user refused with {}: {}", status, message);
        }
    }
}

/// Convert a gate response into an HTTP response, CORS headers included
pub fn into_http_response(response: GateResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_REQUEST);
    let mut builder = HttpResponse::build(status);

    for (name, value) in response.cors.pairs() {
        builder.insert_header((name, value));
    }

    match response.body {
        Some(envelope) => builder.json(envelope),
        None => builder.finish(),
    }
}
