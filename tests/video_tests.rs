//! Integration tests for video generation.
//!
//! These tests drive the full confirm, submit and poll flow against a mock
//! backend with a short poll interval.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use showcase_client::model::Product;
use showcase_client::prompt::RecordingPrompter;
use showcase_client::video::{VideoStudio, GENERATION_STARTED};
use showcase_client::{
    ApiError, BaseUrl, GenerationPolicy, PollState, ShowcaseClient, ShowcaseConfig,
    ValidationError,
};
use tokio_test::assert_ok;
use wiremock::matchers::{any, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_PATH: &str = "/api/video/status/job-1";

// Long enough that a mock round trip finishes well before the next tick
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn studio(
    server: &MockServer,
    max_polls: u32,
    policy: GenerationPolicy,
    prompter: Arc<RecordingPrompter>,
) -> VideoStudio {
    let config = ShowcaseConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .poll_interval(POLL_INTERVAL)
        .max_polls(max_polls)
        .generation_policy(policy)
        .build()
        .unwrap();
    VideoStudio::new(ShowcaseClient::shared(config).unwrap(), prompter)
}

fn lamp() -> Product {
    Product {
        title: Some("Lamp".to_string()),
        affiliate_url: Some("https://www.amazon.com/dp/B08N5WRWNW?tag=shop-20".to_string()),
        ..Product::default()
    }
}

async fn mount_generate(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/api/video/generate"))
        .and(body_partial_json(json!({"product": {"title": "Lamp"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Video generation started",
            "video_id": "job-1"
        })))
        .expect(expected)
        .mount(server)
        .await;
}

fn processing() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "processing",
        "message": "Video generation in progress"
    }))
}

async fn status_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == STATUS_PATH)
        .count()
}

// ============================================================================
// Terminal states
// ============================================================================

#[tokio::test]
async fn test_completion_on_third_poll_stops_polling() {
    let server = MockServer::start().await;
    mount_generate(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(processing())
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "message": "Video ready",
            "filename": "lamp.mp4"
        })))
        .mount(&server)
        .await;

    let prompter = Arc::new(RecordingPrompter::answering(true));
    let studio = studio(&server, 60, GenerationPolicy::AllowConcurrent, prompter.clone());

    let job = studio.request(&lamp()).await.unwrap().unwrap();
    assert_eq!(job.id().as_ref(), "job-1");

    let outcome = job.wait().await;
    assert_eq!(
        outcome.state,
        PollState::Completed {
            filename: "lamp.mp4".to_string()
        }
    );
    assert_eq!(outcome.attempts, 3);

    // A fourth tick would have fired by now if polling had continued
    tokio::time::sleep(POLL_INTERVAL * 3).await;
    assert_eq!(status_requests(&server).await, 3);
    assert_eq!(
        prompter.alerts(),
        vec![
            GENERATION_STARTED.to_string(),
            "Video generated successfully: lamp.mp4".to_string()
        ]
    );
    assert_eq!(studio.active_jobs(), 0);
}

#[tokio::test]
async fn test_failed_status_is_reported() {
    let server = MockServer::start().await;
    mount_generate(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "message": "Renderer crashed"
        })))
        .mount(&server)
        .await;

    let prompter = Arc::new(RecordingPrompter::answering(true));
    let studio = studio(&server, 60, GenerationPolicy::AllowConcurrent, prompter.clone());

    let outcome = studio.request(&lamp()).await.unwrap().unwrap().wait().await;
    assert_eq!(
        outcome.state,
        PollState::Failed {
            message: "Renderer crashed".to_string()
        }
    );
    assert_eq!(outcome.attempts, 1);
    assert!(prompter
        .alerts()
        .contains(&"Video generation failed: Renderer crashed".to_string()));
}

#[tokio::test]
async fn test_pending_job_times_out_after_poll_budget() {
    let server = MockServer::start().await;
    mount_generate(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(processing())
        .mount(&server)
        .await;

    let prompter = Arc::new(RecordingPrompter::answering(true));
    let studio = studio(&server, 60, GenerationPolicy::AllowConcurrent, prompter.clone());

    let outcome = studio.request(&lamp()).await.unwrap().unwrap().wait().await;
    assert_eq!(outcome.state, PollState::TimedOut);
    assert_eq!(outcome.attempts, 60);
    assert_eq!(status_requests(&server).await, 60);
    assert_eq!(
        prompter.alerts().last().map(String::as_str),
        Some("Video generation timed out. Try again later.")
    );
}

#[tokio::test]
async fn test_status_errors_do_not_stop_polling() {
    let server = MockServer::start().await;
    mount_generate(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "completed", "filename": "lamp.mp4"})),
        )
        .mount(&server)
        .await;

    let studio = studio(
        &server,
        60,
        GenerationPolicy::AllowConcurrent,
        Arc::new(RecordingPrompter::answering(true)),
    );

    let outcome = studio.request(&lamp()).await.unwrap().unwrap().wait().await;
    assert!(matches!(outcome.state, PollState::Completed { .. }));
    assert_eq!(outcome.attempts, 3);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancel_stops_polling_silently() {
    let server = MockServer::start().await;
    mount_generate(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(processing())
        .mount(&server)
        .await;

    let prompter = Arc::new(RecordingPrompter::answering(true));
    let studio = studio(&server, 60, GenerationPolicy::AllowConcurrent, prompter.clone());

    let job = studio.request(&lamp()).await.unwrap().unwrap();
    tokio::time::sleep(POLL_INTERVAL * 2 + POLL_INTERVAL / 2).await;
    job.cancel();

    let outcome = job.wait().await;
    assert_eq!(outcome.state, PollState::Cancelled);
    assert!(outcome.attempts < 60);
    assert_eq!(prompter.alerts(), vec![GENERATION_STARTED.to_string()]);
}

#[tokio::test]
async fn test_dropping_job_cancels_poller() {
    let server = MockServer::start().await;
    mount_generate(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(processing())
        .mount(&server)
        .await;

    let studio = studio(
        &server,
        60,
        GenerationPolicy::AllowConcurrent,
        Arc::new(RecordingPrompter::answering(true)),
    );

    let job = studio.request(&lamp()).await.unwrap().unwrap();
    assert_eq!(studio.active_jobs(), 1);
    drop(job);

    tokio::time::sleep(POLL_INTERVAL).await;
    assert_eq!(studio.active_jobs(), 0);
    let after_drop = status_requests(&server).await;
    tokio::time::sleep(POLL_INTERVAL * 3).await;
    assert_eq!(status_requests(&server).await, after_drop);
}

// ============================================================================
// Request flow
// ============================================================================

#[tokio::test]
async fn test_declined_confirmation_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let prompter = Arc::new(RecordingPrompter::answering(false));
    let studio = studio(&server, 60, GenerationPolicy::AllowConcurrent, prompter.clone());

    let job = assert_ok!(studio.request(&lamp()).await);
    assert!(job.is_none());
    assert_eq!(
        prompter.confirmations(),
        vec!["Create a marketing video for \"Lamp\"?\nThis may take a few minutes.".to_string()]
    );
    assert!(prompter.alerts().is_empty());
    assert_eq!(studio.active_jobs(), 0);
}

#[tokio::test]
async fn test_backend_refusal_is_alerted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/video/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "Video service unavailable"
        })))
        .mount(&server)
        .await;

    let prompter = Arc::new(RecordingPrompter::answering(true));
    let studio = studio(&server, 60, GenerationPolicy::AllowConcurrent, prompter.clone());

    let error = studio.request(&lamp()).await.unwrap_err();
    assert!(matches!(error, ApiError::Rejected { .. }));
    assert_eq!(
        prompter.alerts(),
        vec!["Failed to generate video: Video service unavailable".to_string()]
    );
    assert_eq!(studio.active_jobs(), 0);
    assert_eq!(status_requests(&server).await, 0);
}

#[tokio::test]
async fn test_reject_while_active_blocks_duplicate() {
    let server = MockServer::start().await;
    mount_generate(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(processing())
        .mount(&server)
        .await;

    let prompter = Arc::new(RecordingPrompter::answering(true));
    let studio = studio(&server, 60, GenerationPolicy::RejectWhileActive, prompter.clone());

    let first = studio.request(&lamp()).await.unwrap().unwrap();
    let error = studio.request(&lamp()).await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::Validation(ValidationError::GenerationInProgress { ref product })
            if product == "B08N5WRWNW"
    ));
    // The duplicate is refused before the operator is asked
    assert_eq!(prompter.confirmations().len(), 1);
    assert_eq!(studio.active_jobs(), 1);

    first.cancel();
    first.wait().await;
}

#[tokio::test]
async fn test_allow_concurrent_starts_second_job() {
    let server = MockServer::start().await;
    mount_generate(&server, 2).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(processing())
        .mount(&server)
        .await;

    let studio = studio(
        &server,
        60,
        GenerationPolicy::AllowConcurrent,
        Arc::new(RecordingPrompter::answering(true)),
    );

    let first = studio.request(&lamp()).await.unwrap().unwrap();
    let second = studio.request(&lamp()).await.unwrap().unwrap();
    assert_eq!(studio.active_jobs(), 2);

    drop(first);
    drop(second);
}
