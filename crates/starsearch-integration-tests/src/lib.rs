//! End-to-end test harness for StarSearch
//!
//! Starts the full application on an ephemeral port with the upstream directory
//! pointed at a mock server, so tests drive it over real HTTP.

use starsearch_egress::ApiCredential;
use starsearch_server::{ServerConfig, build_app};
use starsearch_ui::ApiClient;
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::debug;

/// Credential the harness hands to the connector
pub const TEST_CREDENTIAL: &str = "test-credential";

/// A running server
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose upstream is `upstream_url`
    pub async fn start(upstream_url: &str) -> anyhow::Result<Self> {
        let mut config = ServerConfig::default();
        config.upstream.base_url = Some(upstream_url.to_string());
        Self::start_with(config).await
    }

    pub async fn start_with(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = build_app(
            &config,
            ApiCredential::new(TEST_CREDENTIAL)?,
            &config.ui_api_base_url(addr.port()),
        )?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                debug!("test server stopped: {}", e);
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Client for the server's people API
    pub fn api_client(&self) -> anyhow::Result<ApiClient> {
        Ok(ApiClient::new(format!("http://{}", self.addr))?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
