//! Bridges core replies onto actix-web responses.

use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;
use serde_json::Value;

use quill_core::validation::ValidationError;
use quill_core::{DomainError, Reply};

/// Render a [`Reply`] as an HTTP response with its status and envelope body.
pub fn into_http<T: Serialize>(reply: Reply<T>) -> HttpResponse {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(reply.body)
}

/// Render a failure that happened before the service was reached.
pub fn failure(err: DomainError) -> HttpResponse {
    into_http(Reply::<()>::failure(&err))
}

/// Parse a raw request body as JSON. Malformed input is a validation
/// failure on the `body` field rather than a framework error page.
pub fn parse_json(body: &[u8]) -> Result<Value, DomainError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed JSON body");
        DomainError::from(ValidationError::single("body", format!("Invalid JSON: {}", e)))
    })
}
