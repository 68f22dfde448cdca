//! People API handlers
//!
//! Both handlers forward to the upstream directory and relay its reply:
//! - upstream 2xx with a JSON body: 200 with that JSON, unchanged
//! - upstream non-success: the upstream status with `{"error": "API Error: <body>"}`
//! - anything that fails along the way: 500 with `{"error": "<context>: <detail>"}`

use crate::middleware::request_id_middleware;
use crate::types::{IngressError, IngressResult};
use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use starsearch_core::{PeopleDirectory, SearchRequest, UpstreamResponse};
use starsearch_observability::{Metrics, Outcome};
use std::{future::Future, sync::Arc, time::Instant};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Shared state for the people API
#[derive(Clone)]
pub struct ApiState {
    pub directory: Arc<dyn PeopleDirectory>,
    pub metrics: Option<Arc<Metrics>>,
    /// Log upstream bodies at info instead of debug
    pub log_requests: bool,
}

impl ApiState {
    pub fn new(directory: Arc<dyn PeopleDirectory>) -> Self {
        Self {
            directory,
            metrics: None,
            log_requests: false,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }
}

/// The two relayed endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Popular,
}

impl Endpoint {
    /// Label used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Popular => "popular",
        }
    }

    /// Prefix of the 500 error message
    pub fn failure_context(&self) -> &'static str {
        match self {
            Endpoint::Search => "An error occurred while searching for the person",
            Endpoint::Popular => "An error occurred while fetching popular people",
        }
    }
}

/// `POST /api/search` handler
///
/// The body is read raw so that malformed JSON is answered with the 500 envelope
/// rather than the extractor's own rejection.
pub async fn search(State(state): State<ApiState>, body: Bytes) -> Response {
    let endpoint = Endpoint::Search;

    let request = match serde_json::from_slice::<SearchRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting search body: {}", e);
            let error = IngressError::failed(endpoint.failure_context(), e.to_string());
            return finish(&state, endpoint, Err(error));
        }
    };

    info!(directory = state.directory.name(), "Searching for person: {}", request.name);
    let directory = state.directory.clone();
    let result = relay(&state, endpoint, async move {
        directory.search_person(&request.name).await
    })
    .await;

    finish(&state, endpoint, result)
}

/// `GET /api/popular` handler
pub async fn popular(State(state): State<ApiState>) -> Response {
    let endpoint = Endpoint::Popular;

    info!(directory = state.directory.name(), "Fetching popular people...");
    let directory = state.directory.clone();
    let result = relay(&state, endpoint, async move { directory.popular_people().await }).await;

    finish(&state, endpoint, result)
}

/// Await the upstream call and turn its reply into the relayed JSON
async fn relay<F>(
    state: &ApiState,
    endpoint: Endpoint,
    upstream: F,
) -> IngressResult<serde_json::Value>
where
    F: Future<Output = starsearch_core::Result<UpstreamResponse>>,
{
    let started = Instant::now();
    let response = upstream
        .await
        .map_err(|e| IngressError::failed(endpoint.failure_context(), e.to_string()))?;

    if let Some(metrics) = &state.metrics {
        metrics.record_upstream(endpoint.label(), response.status, started.elapsed().as_secs_f64());
    }

    info!("Response status: {}", response.status);
    if state.log_requests {
        info!("Response body: {}", response.body);
    } else {
        debug!("Response body: {}", response.body);
    }

    into_json(endpoint, response)
}

/// Interpret a raw upstream reply
pub fn into_json(
    endpoint: Endpoint,
    response: UpstreamResponse,
) -> IngressResult<serde_json::Value> {
    if !response.is_success() {
        return Err(IngressError::UpstreamStatus {
            status: response.status,
            body: response.body,
        });
    }

    serde_json::from_str(&response.body)
        .map_err(|e| IngressError::failed(endpoint.failure_context(), e.to_string()))
}

fn finish(
    state: &ApiState,
    endpoint: Endpoint,
    result: IngressResult<serde_json::Value>,
) -> Response {
    let outcome = match &result {
        Ok(_) => {
            info!("Successfully relayed {} response", endpoint.label());
            Outcome::Success
        }
        Err(e @ IngressError::UpstreamStatus { .. }) => {
            warn!("Upstream rejected {} request: {}", endpoint.label(), e);
            Outcome::UpstreamError
        }
        Err(e @ IngressError::Failed { .. }) => {
            error!("Error in {} handler: {}", endpoint.label(), e);
            Outcome::Failure
        }
    };

    if let Some(metrics) = &state.metrics {
        metrics.record_request(endpoint.label(), outcome);
    }

    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create the people API router
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/search", post(search))
        .route("/api/popular", get(popular))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
