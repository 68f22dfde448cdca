//! StarSearch Egress Connectors
//!
//! This crate provides the connector to the upstream person directory (TMDB):
//! - Shared HTTP client construction
//! - Bearer credential handling
//! - The TMDB connector implementing `PeopleDirectory`

pub mod client;
pub mod credential;
pub mod tmdb;

pub use credential::ApiCredential;
pub use tmdb::{TmdbConfig, TmdbConnector};

use thiserror::Error;

/// Egress error types
#[derive(Debug, Error)]
pub enum EgressError {
    /// Transport failure talking to the upstream
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Credential absent or empty
    #[error("Missing API credential: {0}")]
    MissingCredential(String),

    /// Invalid connector or client configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Query string could not be encoded
    #[error("Failed to encode query: {0}")]
    EncodeError(#[from] serde_urlencoded::ser::Error),
}

/// Egress result type
pub type Result<T> = std::result::Result<T, EgressError>;

impl From<EgressError> for starsearch_core::Error {
    fn from(err: EgressError) -> Self {
        match err {
            EgressError::HttpError(e) => starsearch_core::Error::Upstream(e.to_string()),
            EgressError::MissingCredential(msg) | EgressError::ConfigError(msg) => {
                starsearch_core::Error::Config(msg)
            }
            EgressError::EncodeError(e) => starsearch_core::Error::InvalidRequest(e.to_string()),
        }
    }
}
