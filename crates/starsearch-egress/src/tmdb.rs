//! TMDB egress connector

use crate::{
    Result,
    client::{HttpClientConfig, create_client},
    credential::ApiCredential,
};
use async_trait::async_trait;
use reqwest::{Client, header};
use starsearch_core::{PeopleDirectory, UpstreamResponse};
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const SEARCH_PERSON_PATH: &str = "search/person";
const POPULAR_PERSON_PATH: &str = "person/popular";
const LANGUAGE: &str = "en-US";

/// TMDB connector configuration
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// Bearer credential
    pub credential: ApiCredential,

    /// Base URL for the API (default: https://api.themoviedb.org/3)
    pub base_url: String,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,
}

impl TmdbConfig {
    /// Create a new configuration against the public API
    pub fn new(credential: ApiCredential) -> Self {
        Self {
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
            client_config: HttpClientConfig::default(),
        }
    }

    /// Set the base URL (for mocks and proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_client_config(mut self, client_config: HttpClientConfig) -> Self {
        self.client_config = client_config;
        self
    }
}

/// Query string for a person search. Reserved characters in `name` are percent-encoded.
pub fn search_query(name: &str) -> Result<String> {
    Ok(serde_urlencoded::to_string([
        ("query", name),
        ("include_adult", "false"),
        ("language", LANGUAGE),
        ("page", "1"),
    ])?)
}

/// Query string for the popular list
pub fn popular_query() -> Result<String> {
    Ok(serde_urlencoded::to_string([("language", LANGUAGE), ("page", "1")])?)
}

/// TMDB connector
pub struct TmdbConnector {
    config: TmdbConfig,
    client: Client,
}

impl TmdbConnector {
    /// Create a new TMDB connector
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let client = create_client(&config.client_config)?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str, query: &str) -> String {
        format!(
            "{}/{}?{}",
            self.config.base_url.trim_end_matches('/'),
            path,
            query
        )
    }

    /// Issue a GET against `path` and return status and body untouched
    #[instrument(skip(self, query))]
    pub async fn get(&self, path: &str, query: &str) -> Result<UpstreamResponse> {
        let url = self.url(path, query);
        debug!("Fetching from URL: {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.config.credential.bearer())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let body = response.text().await?;
        debug!("Response body: {}", body);

        Ok(UpstreamResponse::new(status, body))
    }
}

#[async_trait]
impl PeopleDirectory for TmdbConnector {
    async fn search_person(&self, name: &str) -> starsearch_core::Result<UpstreamResponse> {
        let query = search_query(name)?;
        Ok(self.get(SEARCH_PERSON_PATH, &query).await?)
    }

    async fn popular_people(&self) -> starsearch_core::Result<UpstreamResponse> {
        let query = popular_query()?;
        Ok(self.get(POPULAR_PERSON_PATH, &query).await?)
    }

    fn name(&self) -> &str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connector(base_url: &str) -> TmdbConnector {
        let credential = ApiCredential::new("test-key").unwrap();
        TmdbConnector::new(TmdbConfig::new(credential).with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_search_query_fixed_params() {
        assert_eq!(
            search_query("Tom Hanks").unwrap(),
            "query=Tom+Hanks&include_adult=false&language=en-US&page=1"
        );
    }

    #[test]
    fn test_search_query_encodes_reserved_characters() {
        let query = search_query("Tom & Jerry?page=2#x/y+z%").unwrap();
        assert_eq!(
            query,
            "query=Tom+%26+Jerry%3Fpage%3D2%23x%2Fy%2Bz%25\
             &include_adult=false&language=en-US&page=1"
        );
    }

    #[test]
    fn test_search_query_non_ascii() {
        let query = search_query("Penélope Cruz").unwrap();
        assert!(query.starts_with("query=Pen%C3%A9lope+Cruz&"));
    }

    #[test]
    fn test_popular_query() {
        assert_eq!(popular_query().unwrap(), "language=en-US&page=1");
    }

    #[test]
    fn test_url_joining() {
        let conn = connector("http://localhost:9999/3/");
        assert_eq!(
            conn.url(POPULAR_PERSON_PATH, "language=en-US&page=1"),
            "http://localhost:9999/3/person/popular?language=en-US&page=1"
        );
    }

    #[test]
    fn test_default_base_url() {
        let credential = ApiCredential::new("k").unwrap();
        let config = TmdbConfig::new(credential);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(format!("{:?}", config).contains("<redacted>"));
    }
}
