//! Bearer credential for the upstream directory

use crate::{EgressError, Result};

/// Environment variable the credential is read from
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Read-access token sent as `Authorization: Bearer <token>`
///
/// Constructed once at startup and handed to the connector. `Debug` never prints
/// the token.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Wrap a token, rejecting empty or whitespace-only values
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(EgressError::MissingCredential(format!(
                "{} is not set",
                API_KEY_ENV
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiCredential(<redacted>)")
    }
}
