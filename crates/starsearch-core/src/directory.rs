//! People directory trait definitions

use crate::Result;

/// Raw upstream reply, relayed without interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The external person directory, as seen by the request handlers
#[async_trait::async_trait]
pub trait PeopleDirectory: Send + Sync {
    /// Search people by name
    async fn search_person(&self, name: &str) -> Result<UpstreamResponse>;

    /// Fetch the first page of the popular people list
    async fn popular_people(&self) -> Result<UpstreamResponse>;

    /// Short name used in logs and metrics
    fn name(&self) -> &str {
        "directory"
    }
}

#[cfg(test)]
mod tests;
