//! HTTP request handlers.
//!
//! Handlers only read [`WatchState`]: each takes a snapshot, drops the lock,
//! and renders. Render errors are logged and the response is sent anyway.

use axum::{
    Json,
    extract::State,
    http::Uri,
    response::Html,
};
use std::sync::Arc;

use crate::render::{PageView, Renderer};
use crate::store::WatchState;

use super::errors::ApiError;
use super::responses::UpdateResponse;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct ApiState {
    pub watch: Arc<WatchState>,
    pub renderer: Arc<Renderer>,
}

impl ApiState {
    /// Create handler state.
    pub fn new(watch: Arc<WatchState>, renderer: Arc<Renderer>) -> Self {
        Self { watch, renderer }
    }
}

/// Full page.
pub async fn index(State(state): State<ApiState>) -> Html<String> {
    let snapshot = state.watch.snapshot();
    let view = PageView::new(state.watch.config(), &snapshot);

    let mut body = Vec::new();
    if let Err(e) = state.renderer.render_page(&view, &mut body) {
        tracing::error!(error = %e, "Failed to render page");
    }

    Html(String::from_utf8_lossy(&body).into_owned())
}

/// Output fragment wrapped in JSON for client-side refresh.
pub async fn update(State(state): State<ApiState>) -> Json<UpdateResponse> {
    let snapshot = state.watch.snapshot();
    let config = state.watch.config();
    let view = PageView::new(config, &snapshot);

    let mut content = Vec::new();
    if let Err(e) = state.renderer.render_content(&view, &mut content) {
        tracing::error!(error = %e, "Failed to render update");
    }

    Json(UpdateResponse::new(
        config.interval(),
        String::from_utf8_lossy(&content).into_owned(),
    ))
}

/// Any path without a route.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
