//! Integration tests for the HTTP client functionality.
//!
//! These tests verify the client configuration, request building,
//! envelope decoding across status codes, and error handling behavior.

use serde_json::json;
use showcase_client::clients::{DataType, FileUpload, HttpClient, HttpMethod, HttpRequest};
use showcase_client::{BaseUrl, HttpError, InvalidHttpRequestError, ShowcaseConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(url: &str) -> ShowcaseConfig {
    ShowcaseConfig::builder()
        .base_url(BaseUrl::new(url).unwrap())
        .user_agent_prefix("Curator/2.0")
        .build()
        .unwrap()
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_client_carries_base_url_and_default_headers() {
    let client = HttpClient::new(&config_for("http://localhost:5000/")).unwrap();

    assert_eq!(client.base_url().as_ref(), "http://localhost:5000");
    let user_agent = &client.default_headers()["User-Agent"];
    assert!(user_agent.starts_with("Curator/2.0 | Showcase Client v"));
    assert_eq!(client.default_headers()["Accept"], "application/json");
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "api/videos").build().unwrap();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.code, 200);
}

// ============================================================================
// Request building
// ============================================================================

#[test]
fn test_invalid_requests_are_rejected_at_build_time() {
    let result = HttpRequest::builder(HttpMethod::Post, "api/search").build();
    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::MissingBody { .. })
    ));

    let result = HttpRequest::builder(HttpMethod::Put, "api/products/update/B08N5WRWNW")
        .body(json!({"title": "x"}))
        .build();
    assert!(matches!(result, Err(InvalidHttpRequestError::MissingBodyType)));

    let result = HttpRequest::builder(HttpMethod::Post, "api/products/import")
        .upload(FileUpload::new("p.json", b"{}".to_vec()))
        .body(json!({}))
        .build();
    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::ConflictingBodies)
    ));
}

// ============================================================================
// Responses
// ============================================================================

#[tokio::test]
async fn test_non_2xx_json_is_returned_as_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/remove/B000000000"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Product not found"})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Delete, "api/products/remove/B000000000")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();
    assert!(!response.is_ok());
    assert_eq!(response.body["error"], "Product not found");
}

#[tokio::test]
async fn test_empty_body_decodes_as_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "api/videos").build().unwrap();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.body, json!({}));
}

#[tokio::test]
async fn test_non_json_error_page_is_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(502)
                .insert_header("x-request-id", "req-42")
                .set_body_string("<html>Bad Gateway</html>"),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Post, "api/search")
        .body(json!({"keywords": "lamp"}))
        .body_type(DataType::Json)
        .build()
        .unwrap();

    match client.request(request).await {
        Err(HttpError::Response(e)) => {
            assert_eq!(e.code, 502);
            assert!(e.message.contains("Bad Gateway"));
            assert_eq!(e.error_reference.as_deref(), Some("req-42"));
        }
        other => panic!("expected response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let client = HttpClient::new(&config_for("http://127.0.0.1:9")).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "api/videos").build().unwrap();

    let result = client.request(request).await;
    assert!(matches!(result, Err(HttpError::Network(_))));
}
