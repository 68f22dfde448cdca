//! HTTP client for the people API, as used by the search view

use crate::view::Action;
use reqwest::{Client, header};
use starsearch_core::{PeoplePage, SearchRequest};
use thiserror::Error;
use tracing::{debug, warn};

/// Longest prefix of a non-JSON body that is logged
const NON_JSON_LOG_LIMIT: usize = 500;

/// Why an API call produced no listing
#[derive(Debug, Error)]
pub enum ViewError {
    /// The handler answered with something other than JSON
    #[error("Received non-JSON response from server")]
    NonJson,

    /// The handler reported an error envelope
    #[error("{0}")]
    Reported(String),

    /// Non-success status without an error envelope
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// JSON that is not a people listing
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The API could not be reached
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Turn a handler reply into a listing
///
/// Order of checks: content type, error envelope, status, listing shape.
pub fn interpret(
    status: u16,
    content_type: Option<&str>,
    body: &str,
) -> Result<PeoplePage, ViewError> {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        let preview: String = body.chars().take(NON_JSON_LOG_LIMIT).collect();
        warn!("Non-JSON response: {}", preview);
        return Err(ViewError::NonJson);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ViewError::Malformed(e.to_string()))?;

    if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
        return Err(ViewError::Reported(message.to_string()));
    }

    if !(200..300).contains(&status) {
        return Err(ViewError::Status(status));
    }

    serde_json::from_value(value).map_err(|e| ViewError::Malformed(e.to_string()))
}

/// Client for `/api/search` and `/api/popular`
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client against the server at `base_url` (e.g. `http://127.0.0.1:3000`)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ViewError> {
        let client = Client::builder()
            .user_agent(format!("StarSearch-UI/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/search` with `{"name": ...}`
    pub async fn search(&self, name: &str) -> Result<PeoplePage, ViewError> {
        let response = self
            .client
            .post(format!("{}/api/search", self.base_url))
            .json(&SearchRequest::new(name))
            .send()
            .await?;
        Self::read(response).await
    }

    /// `GET /api/popular`
    pub async fn popular(&self) -> Result<PeoplePage, ViewError> {
        let response = self
            .client
            .get(format!("{}/api/popular", self.base_url))
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn execute(&self, action: &Action) -> Result<PeoplePage, ViewError> {
        match action {
            Action::Search { name } => self.search(name).await,
            Action::Popular => self.popular().await,
        }
    }

    async fn read(response: reqwest::Response) -> Result<PeoplePage, ViewError> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        debug!("API response status {}", status);

        interpret(status, content_type.as_deref(), &body)
    }
}
