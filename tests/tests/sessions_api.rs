//! Tests for session listing and replay timeline endpoints.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

async fn seed(server: &TestServer, payload: serde_json::Value) {
    server
        .post("/api/events")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_session_list_newest_first() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    seed(&server, fixtures::page_view_at("older", "/a", "2024-05-01T10:00:00Z")).await;
    seed(&server, fixtures::page_view_at("newer", "/a", "2024-05-01T11:00:00Z")).await;

    let response = server.get("/api/sessions").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["_id"], "newer");
    assert_eq!(data[1]["_id"], "older");
}

/// A page view plus a click in one session shows up as one summary with
/// eventCount 2 spanning both timestamps.
#[tokio::test]
async fn test_session_list_aggregates_events() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    seed(&server, fixtures::page_view_at("s1", "/a", "2024-05-01T10:00:00Z")).await;
    seed(&server, fixtures::click_at("s1", "/a", 100.0, 200.0, "2024-05-01T10:05:00Z")).await;

    let response = server.get("/api/sessions").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["_id"], "s1");
    assert_eq!(data[0]["eventCount"], 2);
    assert!(data[0]["startTime"].as_str().unwrap().starts_with("2024-05-01T10:00:00"));
    assert!(data[0]["endTime"].as_str().unwrap().starts_with("2024-05-01T10:05:00"));
}

#[tokio::test]
async fn test_session_list_pagination() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    seed(&server, fixtures::page_view_at("s1", "/a", "2024-05-01T10:00:00Z")).await;
    seed(&server, fixtures::page_view_at("s2", "/a", "2024-05-01T11:00:00Z")).await;
    seed(&server, fixtures::page_view_at("s3", "/a", "2024-05-01T12:00:00Z")).await;

    let response = server
        .get("/api/sessions")
        .add_query_param("limit", 2)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["skip"], 0);
    assert_eq!(body["hasMore"], true);

    let response = server
        .get("/api/sessions")
        .add_query_param("limit", 2)
        .add_query_param("skip", 2)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["_id"], "s1");
    assert_eq!(body["page"], 2);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_session_list_clamps_limit() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .get("/api/sessions")
        .add_query_param("limit", 100_000)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["limit"], 100);

    let response = server
        .get("/api/sessions")
        .add_query_param("limit", 0)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["limit"], 1);
}

#[tokio::test]
async fn test_session_detail_chronological_order() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    // Arrive out of order; replay must be chronological
    seed(&server, fixtures::click_at("s1", "/a", 10.0, 10.0, "2024-05-01T10:02:00Z")).await;
    seed(&server, fixtures::page_view_at("s1", "/a", "2024-05-01T10:00:00Z")).await;
    seed(&server, fixtures::click_at("s1", "/a", 20.0, 20.0, "2024-05-01T10:01:00Z")).await;

    let response = server.get("/api/sessions/s1").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["event_type"], "page_view");
    assert_eq!(data[1]["position_x"], 20.0);
    assert_eq!(data[2]["position_x"], 10.0);
}

/// limit=1 against a 2-event session pages with hasMore; limit=2 does not.
#[tokio::test]
async fn test_session_detail_pagination() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    seed(&server, fixtures::page_view_at("s1", "/a", "2024-05-01T10:00:00Z")).await;
    seed(&server, fixtures::click_at("s1", "/a", 10.0, 10.0, "2024-05-01T10:01:00Z")).await;

    let response = server
        .get("/api/sessions/s1")
        .add_query_param("limit", 1)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["hasMore"], true);

    let response = server
        .get("/api/sessions/s1")
        .add_query_param("limit", 2)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_session_detail_unknown_session_is_empty() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/api/sessions/no-such-session").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_session_detail_store_failure_returns_500() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.set_store_failure(true);

    let response = server.get("/api/sessions/s1").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Mock store failure"));
}
