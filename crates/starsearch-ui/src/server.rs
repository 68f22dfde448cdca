//! Web UI router

use crate::{client::ApiClient, handlers};
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Serve the search page (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Base URL of the people API the page calls. Defaults to the server's own address.
    #[serde(default)]
    pub api_base_url: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_base_url: None,
        }
    }
}

/// Shared state for the UI handlers
#[derive(Debug, Clone)]
pub struct UiState {
    pub client: ApiClient,
}

impl UiState {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// Build the UI router
pub fn ui_router(state: UiState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        // Embedded in binary
        .route("/static/style.css", get(handlers::static_files::serve_css))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
