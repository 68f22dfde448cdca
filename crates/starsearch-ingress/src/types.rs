//! Shared ingress types and utilities

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use starsearch_core::ErrorEnvelope;
use thiserror::Error;

/// Request ID for tracing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new request ID
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let count = COUNTER.fetch_add(1, Ordering::Relaxed);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros();

        Self(format!("req_{:x}_{:x}", timestamp, count))
    }

    /// Create from existing string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ingress error types
///
/// Every variant is answered with an `{ "error": ... }` envelope.
#[derive(Debug, Error)]
pub enum IngressError {
    /// The upstream answered with a non-success status; relayed with that status
    #[error("API Error: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Anything else that went wrong while handling the request
    #[error("{context}: {message}")]
    Failed {
        context: &'static str,
        message: String,
    },
}

impl IngressError {
    pub fn failed(context: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            context,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // An upstream status outside the valid range cannot be relayed as-is
            IngressError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            IngressError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            IngressError::UpstreamStatus { body, .. } => ErrorEnvelope::api_error(body),
            IngressError::Failed { .. } => ErrorEnvelope::new(self.to_string()),
        }
    }
}

impl IntoResponse for IngressError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}

/// Ingress result type
pub type IngressResult<T> = Result<T, IngressError>;
