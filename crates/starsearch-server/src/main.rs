//! StarSearch server
//!
//! Serves the people API backed by TMDB together with the search page:
//! - `POST /api/search` with `{"name": "..."}`
//! - `GET /api/popular`
//! - `GET /` search page, `/healthz`, `/metrics`
//!
//! Usage:
//! ```bash
//! # With environment variables
//! TMDB_API_KEY=your_token starsearch-server
//!
//! # With a config file (env vars override it, flags override both)
//! TMDB_API_KEY=your_token starsearch-server --config starsearch.yaml --port 8080
//! ```
//!
//! Test with:
//! ```bash
//! curl http://localhost:3000/api/search \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Tom Hanks"}'
//!
//! curl http://localhost:3000/api/popular
//! ```

use anyhow::Context;
use clap::Parser;
use starsearch_observability::{LogFormat, init_logging};
use starsearch_server::{ServerConfig, build_app};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{error, info};

/// StarSearch - people search backed by TMDB
#[derive(Parser)]
#[command(name = "starsearch-server", version)]
#[command(about = "StarSearch server: people API and search page", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "STARSEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log output format
    #[arg(long, value_name = "FORMAT", value_parser = ["text", "json"])]
    log_format: Option<String>,
}

impl Cli {
    /// Apply flag overrides (highest precedence)
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        match self.log_format.as_deref() {
            Some("json") => config.logging.format = LogFormat::Json,
            Some("text") => config.logging.format = LogFormat::Text,
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };

    // Merge environment variables (they override config file)
    config.merge_env()?;
    cli.apply(&mut config);

    init_logging(&config.logging.level, config.logging.format)
        .context("failed to install tracing subscriber")?;

    info!("🚀 Starting StarSearch server v{}", env!("CARGO_PKG_VERSION"));
    match &cli.config {
        Some(path) => info!("📁 Loaded configuration from: {}", path.display()),
        None => info!("📁 Using default configuration"),
    }

    // Refuse to start without a credential
    let credential = match config.credential() {
        Ok(credential) => credential,
        Err(e) => {
            error!("❌ {}", e);
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr()?;

    let app = build_app(&config, credential, &config.ui_api_base_url(addr.port()))?;

    info!("");
    info!("✅ StarSearch listening on http://{}", addr);
    info!("   API endpoints:");
    info!("   - Search:             POST http://{}/api/search", addr);
    info!("   - Popular:            GET  http://{}/api/popular", addr);
    if config.ui.enabled {
        info!("   - Search page:        http://{}/", addr);
    }
    info!("   Observability:");
    info!("   - Health check:       http://{}/healthz", addr);
    if config.metrics.enabled {
        info!("   - Prometheus metrics: http://{}/metrics", addr);
    }
    info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
