//! End-to-end workflow tests.
//!
//! The executor runs a real command and the HTTP front end serves its output.

use httpwatch::{Executor, build_router, start_server};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::common::{api_state, wait_for_cycle, watch_state};

async fn fetch_update(router: axum::Router) -> Value {
    let request = Request::builder()
        .uri("/update")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Test: `echo hi` every second shows up in the update fragment.
#[tokio::test]
async fn test_echo_output_reaches_update_endpoint() {
    let watch = watch_state(&["echo", "hi"], Duration::from_secs(1));
    let (handle, task) = Executor::new(watch.clone()).start();
    let router = build_router(api_state(watch.clone()));

    wait_for_cycle(&watch, 1, Duration::from_secs(2)).await;

    let json = fetch_update(router).await;
    assert_eq!(json["interval"], 1000);
    assert!(json["content"].as_str().unwrap().contains("hi<br/>"));

    handle.shutdown();
    task.await.unwrap();
}

/// Test: The page reflects exactly the latest cycle.
#[tokio::test]
async fn test_page_tracks_latest_cycle() {
    let watch = watch_state(
        &["sh", "-c", "date +%s%N"],
        Duration::from_millis(100),
    );
    let (handle, task) = Executor::new(watch.clone()).start();
    let router = build_router(api_state(watch.clone()));

    wait_for_cycle(&watch, 3, Duration::from_secs(5)).await;
    handle.shutdown();
    task.await.unwrap();

    let latest = watch.snapshot();
    let json = fetch_update(router).await;
    let content = json["content"].as_str().unwrap();

    assert!(latest.cycle >= 3);
    assert!(content.contains(&latest.output));
}

/// Test: A real HTTP request against a bound server returns the output.
#[tokio::test]
async fn test_served_over_tcp() {
    let watch = watch_state(&["echo", "over-the-wire"], Duration::from_secs(1));
    let shutdown = CancellationToken::new();

    let (_executor, executor_task) = Executor::new(watch.clone())
        .with_cancellation(shutdown.child_token())
        .start();
    let server = start_server("127.0.0.1:0", api_state(watch.clone()), shutdown.child_token())
        .await
        .unwrap();

    wait_for_cycle(&watch, 1, Duration::from_secs(5)).await;

    let mut stream = TcpStream::connect(server.local_addr).await.unwrap();
    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("echo over-the-wire"));
    assert!(response.contains("over-the-wire<br/>"));

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), server.task)
        .await
        .expect("server did not stop")
        .unwrap();
    executor_task.await.unwrap();
}
