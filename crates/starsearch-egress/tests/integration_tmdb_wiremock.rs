//! Integration tests for the TMDB connector using wiremock
//!
//! These tests mock the TMDB API to verify the connector's HTTP behavior.

use starsearch_core::PeopleDirectory;
use starsearch_egress::{ApiCredential, TmdbConfig, TmdbConnector};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

fn connector(base_url: String) -> TmdbConnector {
    let credential = ApiCredential::new("test-key").unwrap();
    TmdbConnector::new(TmdbConfig::new(credential).with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn test_search_person_sends_credential_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/person"))
        .and(query_param("query", "Tom Hanks"))
        .and(query_param("include_adult", "false"))
        .and(query_param("language", "en-US"))
        .and(query_param("page", "1"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": 1,
            "results": [{"name": "Tom Hanks", "known_for_department": "Acting", "known_for": []}],
            "total_pages": 1,
            "total_results": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = connector(mock_server.uri())
        .search_person("Tom Hanks")
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["results"][0]["name"], "Tom Hanks");
}

#[tokio::test]
async fn test_search_person_reserved_characters_round_trip() {
    let mock_server = MockServer::start().await;

    // The matcher compares decoded values, so the name arrives intact
    Mock::given(method("GET"))
        .and(path("/search/person"))
        .and(query_param("query", "Tom & Jerry?x=1"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results":[]}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = connector(mock_server.uri())
        .search_person("Tom & Jerry?x=1")
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_popular_people_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/person/popular"))
        .and(query_param("language", "en-US"))
        .and(query_param("page", "1"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"page":1,"results":[]}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = connector(mock_server.uri()).popular_people().await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"page":1,"results":[]}"#);
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/person/popular"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"status_code":7,"status_message":"Invalid API key"}"#),
        )
        .mount(&mock_server)
        .await;

    let response = connector(mock_server.uri()).popular_people().await.unwrap();

    assert_eq!(response.status, 401);
    assert!(!response.is_success());
    assert!(response.body.contains("Invalid API key"));
}

#[tokio::test]
async fn test_connection_failure_propagates() {
    // Nothing listens on port 1
    let result = connector("http://127.0.0.1:1".to_string())
        .search_person("anyone")
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, starsearch_core::Error::Upstream(_)));
}
