//! Integration tests for the search page.
//!
//! These tests run the search controller against a mock backend and verify
//! request dispatch per mode, the polymorphic response handling, and the
//! rendering of empty and failed searches.

use std::sync::Arc;

use serde_json::json;
use showcase_client::pages::search::SEARCH_FAILED;
use showcase_client::pages::{SearchController, SearchMode, SearchOutcome};
use showcase_client::prompt::RecordingPrompter;
use showcase_client::render::NO_RESULTS;
use showcase_client::{BaseUrl, ShowcaseClient, ShowcaseConfig, Store, ValidationError};
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller(server: &MockServer) -> (SearchController, Arc<RecordingPrompter>) {
    let config = ShowcaseConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = ShowcaseClient::shared(config).unwrap();
    let prompter = Arc::new(RecordingPrompter::answering(true));
    (SearchController::new(client, prompter.clone()), prompter)
}

fn product(title: &str, asin: &str) -> serde_json::Value {
    json!({
        "title": title,
        "price": "$19.99",
        "affiliate_url": format!("https://www.amazon.com/dp/{asin}?tag=shop-20"),
        "rating": 4.3,
        "reviews_count": 2048
    })
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn test_keyword_search_sends_keywords_store_and_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"keywords": "desk lamp", "store": "aliexpress", "count": 20})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "products": [product("Lamp", "B08N5WRWNW"), product("Bulb", "B000000001")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut search, _) = controller(&server);
    search.set_store(Store::AliExpress);

    let outcome = search.search("  desk lamp ").await.unwrap();
    match outcome {
        SearchOutcome::Results(cards) => {
            assert_eq!(cards.len(), 2);
            assert_eq!(cards[0].id.as_ref().unwrap().as_ref(), "B08N5WRWNW");
        }
        other => panic!("expected results, got {other:?}"),
    }
    assert!(search.html().contains(r#"href="/product/B000000001""#));
    assert!(search.html().contains("4.3 (2,048 reviews)"));
}

#[tokio::test]
async fn test_url_search_returns_single_product() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/product/url"))
        .and(body_json(json!({"url": "https://amzn.to/abc", "store": "amazon"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "product": product("Headphones", "B08N5WRWNW"),
            "store": "amazon"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut search, _) = controller(&server);
    search.set_mode(SearchMode::Url);

    let outcome = search.search("https://amzn.to/abc").await.unwrap();
    assert!(matches!(outcome, SearchOutcome::Results(cards) if cards.len() == 1));
}

#[tokio::test]
async fn test_category_search_caps_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/category"))
        .and(body_json(json!({
            "url": "https://www.amazon.com/b?node=172282",
            "max_products": 20
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "products": [],
            "count": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut search, _) = controller(&server);
    search.set_mode(SearchMode::Category);

    let outcome = search
        .search("https://www.amazon.com/b?node=172282")
        .await
        .unwrap();
    assert_eq!(outcome, &SearchOutcome::NoResults);
    assert!(search.html().contains(NO_RESULTS));
}

// ============================================================================
// Validation and failures
// ============================================================================

#[tokio::test]
async fn test_blank_input_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (mut search, prompter) = controller(&server);
    let result = search.search("   ").await;

    assert_eq!(
        result,
        Err(ValidationError::EmptyInput {
            field: "a search term"
        })
    );
    assert_eq!(prompter.alerts(), vec!["Please enter a search term.".to_string()]);
    assert!(search.outcome().is_none());
}

#[tokio::test]
async fn test_failed_envelope_renders_as_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/product/url"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Product not found"})),
        )
        .mount(&server)
        .await;

    let (mut search, prompter) = controller(&server);
    search.set_mode(SearchMode::Url);

    let outcome = search.search("https://amazon.com/dp/B000000000").await.unwrap();
    assert_eq!(outcome, &SearchOutcome::NoResults);
    assert_eq!(prompter.alerts(), vec![NO_RESULTS.to_string()]);
}

#[tokio::test]
async fn test_transport_failure_renders_error_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let (mut search, prompter) = controller(&server);

    let outcome = search.search("lamp").await.unwrap().clone();
    assert_eq!(
        outcome,
        SearchOutcome::Failed {
            message: SEARCH_FAILED.to_string()
        }
    );
    assert!(search.html().contains(SEARCH_FAILED));
    assert_eq!(prompter.alerts(), vec![SEARCH_FAILED.to_string()]);
}

#[tokio::test]
async fn test_new_search_replaces_previous_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"keywords": "lamp", "store": "amazon", "count": 20})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "products": [product("Lamp", "B08N5WRWNW")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"keywords": "nothing", "store": "amazon", "count": 20})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "products": []})),
        )
        .mount(&server)
        .await;

    let (mut search, prompter) = controller(&server);

    search.search("lamp").await.unwrap();
    assert!(search.html().contains("Lamp"));
    assert!(prompter.alerts().is_empty());

    search.search("nothing").await.unwrap();
    assert!(!search.html().contains("Lamp"));
    assert!(search.html().contains(NO_RESULTS));
    assert_eq!(prompter.alerts(), vec![NO_RESULTS.to_string()]);
}
