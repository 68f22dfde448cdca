//! Request and error bodies exchanged between the browser view and the handlers

use serde::{Deserialize, Serialize};

/// Body of `POST /api/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub name: String,
}

impl SearchRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Normalized failure body returned by both handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Wrap the body of a non-success upstream response
    pub fn api_error(upstream_body: &str) -> Self {
        Self::new(format!("API Error: {}", upstream_body))
    }
}
