//! API integration tests.
//!
//! These tests drive the router directly with published results.

use httpwatch::{ApiState, ExecutionResult, Renderer, WatchConfig, WatchState, build_router};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Local;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::common::{api_state, watch_state};

fn published(output: &str, failure: Option<&str>) -> ExecutionResult {
    ExecutionResult {
        output: output.to_string(),
        failure: failure.map(str::to_string),
        completed_at: Some(Local::now()),
        cycle: 1,
    }
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, content_type, body.to_vec())
}

/// Test: Root page shows the command and the latest output.
#[tokio::test]
async fn test_index_contains_command_and_output() {
    let watch = watch_state(&["uptime", "-p"], Duration::from_secs(2));
    watch.publish(published("up 3 days<br/>", None));
    let router = build_router(api_state(watch));

    let (status, content_type, body) = get(router, "/").await;
    let body = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("uptime -p"));
    assert!(body.contains("Every 2s"));
    assert!(body.contains("up 3 days<br/>"));
}

/// Test: Root page omits the header when suppressed.
#[tokio::test]
async fn test_index_without_title() {
    let config = WatchConfig::builder(["uptime"])
        .no_title(true)
        .build()
        .unwrap();
    let watch = Arc::new(WatchState::new(Arc::new(config)));
    watch.publish(published("up<br/>", None));
    let router = build_router(api_state(watch));

    let (status, _, body) = get(router, "/").await;
    let body = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Every 2s"));
    assert!(body.contains("up<br/>"));
}

/// Test: Any path other than the root and the update endpoint is not found.
#[tokio::test]
async fn test_unknown_paths_return_404() {
    let watch = watch_state(&["date"], Duration::from_secs(2));
    let router = build_router(api_state(watch));

    for uri in ["/index.html", "/favicon.ico", "/update/extra", "/a/b"] {
        let (status, _, body) = get(router.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "path {}", uri);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
    }
}

/// Test: Update endpoint returns the fragment and interval as JSON.
#[tokio::test]
async fn test_update_returns_json_fragment() {
    let watch = watch_state(&["date"], Duration::from_millis(1500));
    watch.publish(published("Mon Jan 1<br/>", None));
    let router = build_router(api_state(watch));

    let (status, content_type, body) = get(router, "/update").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["interval"], 1500);

    let content = json["content"].as_str().unwrap();
    assert!(content.contains("Mon Jan 1<br/>"));
    assert!(!content.contains("<html"));
}

/// Test: Endpoints do not restrict the request method.
#[tokio::test]
async fn test_endpoints_accept_any_method() {
    let watch = watch_state(&["date"], Duration::from_secs(2));
    watch.publish(published("Mon Jan 1<br/>", None));
    let router = build_router(api_state(watch));

    for (method, uri) in [("POST", "/"), ("HEAD", "/"), ("POST", "/update"), ("PUT", "/update")] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{} {}", method, uri);
    }

    let request = Request::builder()
        .method("POST")
        .uri("/missing")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Test: Update endpoint reports the clamped interval.
#[tokio::test]
async fn test_update_interval_is_clamped() {
    let watch = watch_state(&["date"], Duration::from_millis(10));
    let router = build_router(api_state(watch));

    let (_, _, body) = get(router, "/update").await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["interval"], 100);
}

/// Test: Update fragment includes the failure description.
#[tokio::test]
async fn test_update_includes_failure() {
    let watch = watch_state(&["false"], Duration::from_secs(2));
    watch.publish(published("", Some("exit status 1")));
    let router = build_router(api_state(watch));

    let (_, _, body) = get(router, "/update").await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert!(json["content"].as_str().unwrap().contains("exit status 1"));
}

/// Test: Before the first run the page says so.
#[tokio::test]
async fn test_update_before_first_run() {
    let watch = watch_state(&["date"], Duration::from_secs(2));
    let router = build_router(api_state(watch));

    let (status, _, body) = get(router, "/update").await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(
        json["content"]
            .as_str()
            .unwrap()
            .contains("waiting for first run")
    );
}

/// Test: A template that fails while rendering still yields a response.
#[tokio::test]
async fn test_render_errors_do_not_fail_requests() {
    let watch = watch_state(&["date"], Duration::from_secs(2));
    let renderer = Renderer::with_templates(
        "before{% include \"missing.html\" %}",
        "partial{% include \"missing.html\" %}",
    )
    .unwrap();
    let router = build_router(ApiState::new(watch, Arc::new(renderer)));

    let (status, content_type, _) = get(router.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));

    let (status, content_type, body) = get(router, "/update").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["interval"], 2000);
    assert!(json["content"].is_string());
}
