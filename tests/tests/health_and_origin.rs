//! Tests for health endpoints and browser-origin enforcement.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

#[tokio::test]
async fn test_health_reports_ok_when_storage_up() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_health_returns_503_when_storage_down() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.set_store_failure(true);

    let response = server.get("/health").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_live_probe_always_responds() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/health/live").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_ready_probe_returns_valid_status() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    // Readiness follows the process-wide health registry, which other tests
    // may have touched; only the status range is deterministic here
    let response = server.get("/health/ready").await;
    let status = response.status_code();
    assert!(
        status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE,
        "Ready endpoint should return 200 or 503, got {}",
        status
    );
}

#[tokio::test]
async fn test_request_without_origin_is_allowed() {
    // Empty allowlist: non-browser callers still pass
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/events")
        .json(&fixtures::page_view("s1", "/a"))
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_empty_allowlist_denies_browser_origin() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/events")
        .add_header("Origin", "http://dashboard.example")
        .json(&fixtures::page_view("s1", "/a"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("http://dashboard.example"));
    assert_eq!(ctx.store.event_count(), 0);
}

#[tokio::test]
async fn test_allowlisted_origin_is_accepted() {
    let ctx = TestContext::with_origins(vec!["http://dashboard.example".to_string()]);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/events")
        .add_header("Origin", "http://dashboard.example")
        .json(&fixtures::page_view("s1", "/a"))
        .await;
    response.assert_status(StatusCode::CREATED);

    // Queries pass the same check
    let response = server
        .get("/api/sessions")
        .add_header("Origin", "http://dashboard.example")
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_unlisted_origin_is_rejected_with_allowlist_present() {
    let ctx = TestContext::with_origins(vec!["http://dashboard.example".to_string()]);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .get("/api/sessions")
        .add_header("Origin", "http://other.example")
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}
