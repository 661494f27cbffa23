//! PSK-based authentication for owner-only routes.
//!
//! Posts, projects and the technology catalog are edited only by the site owner. Topics and
//! votes stay open to visitors.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware admitting a request only if it carries the owner key.
///
/// With no key configured every request passes.
pub async fn require_owner(expected_psk: Option<String>, request: Request, next: Next) -> Response {
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    let verdict = match provided_key(request.headers()) {
        Some(key) if constant_time_compare(key, &expected) => Ok(()),
        Some(_) => Err("Invalid API key"),
        None => Err("Missing API key"),
    };

    match verdict {
        Ok(()) => next.run(request).await,
        Err(message) => unauthorized(message),
    }
}

/// Key from `x-api-key`, falling back to an `Authorization: Bearer` token.
fn provided_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn unauthorized(message: &str) -> Response {
    tracing::warn!("Rejected owner request: {}", message);
    AppError::Unauthorized(message.to_string()).into_response()
}
