//! Per-request protocol context.
//!
//! # Responsibilities
//! - Hold the resolved protocol for the lifetime of a request
//! - Expose it to handlers as an extractor

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use serde::Serialize;

use crate::protocol::HTTPS;

/// Protocol the client used, as resolved by [`protocol_middleware`].
///
/// [`protocol_middleware`]: crate::http::middleware::protocol::protocol_middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestProtocol(String);

impl RequestProtocol {
    pub fn new(protocol: impl Into<String>) -> Self {
        Self(protocol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the client reached us over https.
    pub fn is_secure(&self) -> bool {
        self.0.eq_ignore_ascii_case(HTTPS)
    }
}

impl std::fmt::Display for RequestProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for RequestProtocol
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Request protocol was not resolved",
        ))
    }
}
