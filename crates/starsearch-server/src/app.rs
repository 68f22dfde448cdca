//! Application assembly

use crate::config::ServerConfig;
use anyhow::Context;
use axum::Router;
use starsearch_egress::{ApiCredential, TmdbConfig, TmdbConnector};
use starsearch_ingress::{ApiState, router as api_router};
use starsearch_observability::{HealthState, Metrics, health_router};
use starsearch_ui::{ApiClient, UiState, ui_router};
use std::sync::Arc;
use tracing::info;

/// Build the full router
///
/// `ui_api_base_url` is where the search page sends its API calls, normally this
/// server's own address.
pub fn build_app(
    config: &ServerConfig,
    credential: ApiCredential,
    ui_api_base_url: &str,
) -> anyhow::Result<Router> {
    let mut tmdb_config = TmdbConfig::new(credential)
        .with_client_config(config.upstream.http_client.to_client_config());
    if let Some(base_url) = &config.upstream.base_url {
        tmdb_config = tmdb_config.with_base_url(base_url.clone());
    }
    let connector = TmdbConnector::new(tmdb_config).context("failed to create TMDB connector")?;
    info!("🔌 Upstream directory: {}", connector.base_url());

    let metrics = if config.metrics.enabled {
        info!("📊 Initializing metrics");
        Some(Arc::new(Metrics::new().context("failed to register metrics")?))
    } else {
        None
    };

    let mut api_state =
        ApiState::new(Arc::new(connector)).with_request_logging(config.logging.log_requests);
    if let Some(metrics) = &metrics {
        api_state = api_state.with_metrics(metrics.clone());
    }

    let mut app = api_router(api_state).merge(health_router(HealthState::new(metrics)));

    if config.ui.enabled {
        let client = ApiClient::new(ui_api_base_url).context("failed to create UI API client")?;
        info!("🖥️  Search page calls API at {}", client.base_url());
        app = app.merge(ui_router(UiState::new(client)));
    } else {
        info!("🖥️  Search page disabled in configuration");
    }

    Ok(app)
}
