//! Tests for the directory trait

use super::*;
use crate::Error;

struct FixedDirectory {
    response: UpstreamResponse,
}

#[async_trait::async_trait]
impl PeopleDirectory for FixedDirectory {
    async fn search_person(&self, _name: &str) -> Result<UpstreamResponse> {
        Ok(self.response.clone())
    }

    async fn popular_people(&self) -> Result<UpstreamResponse> {
        Err(Error::Upstream("unreachable".to_string()))
    }
}

#[test]
fn test_success_range() {
    assert!(UpstreamResponse::new(200, "{}").is_success());
    assert!(UpstreamResponse::new(204, "").is_success());
    assert!(!UpstreamResponse::new(199, "").is_success());
    assert!(!UpstreamResponse::new(301, "").is_success());
    assert!(!UpstreamResponse::new(404, "not found").is_success());
}

#[tokio::test]
async fn test_trait_object_dispatch() {
    let directory: Box<dyn PeopleDirectory> = Box::new(FixedDirectory {
        response: UpstreamResponse::new(200, r#"{"results":[]}"#),
    });

    let reply = directory.search_person("anyone").await.unwrap();
    assert_eq!(reply.body, r#"{"results":[]}"#);
    assert!(directory.popular_people().await.is_err());
    assert_eq!(directory.name(), "directory");
}
