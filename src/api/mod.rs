//! HTTP front end.
//!
//! Serves the watched command's latest output as a full page at `/` and as
//! a JSON-wrapped fragment at `/update` for client-side refresh.

mod errors;
mod handlers;
mod responses;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::ApiState;
pub use responses::UpdateResponse;

use axum::{Router, routing::any};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Build the router with all endpoints.
///
/// Both endpoints answer any request method.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", any(handlers::index))
        .route("/update", any(handlers::update))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A running HTTP server.
#[derive(Debug)]
pub struct ServerHandle {
    /// Address the listener is bound to.
    pub local_addr: SocketAddr,
    /// Task driving the server. Completes once shutdown has drained.
    pub task: JoinHandle<()>,
}

/// Start the HTTP server.
///
/// Binds `address`, then serves in a spawned task until `shutdown` is
/// cancelled. After cancellation no new connections are accepted and
/// in-flight requests are allowed to finish.
pub async fn start_server(
    address: &str,
    state: ApiState,
    shutdown: CancellationToken,
) -> std::io::Result<ServerHandle> {
    let router = build_router(state);

    let listener = TcpListener::bind(address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Listening at http://{}", local_addr);

    let task = tokio::spawn(async move {
        let result = axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled_owned().await })
            .await;
        if let Err(e) = result {
            tracing::error!("HTTP server error: {}", e);
        }
        tracing::info!("HTTP server stopped");
    });

    Ok(ServerHandle { local_addr, task })
}
