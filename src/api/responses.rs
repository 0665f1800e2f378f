//! API response types.

use serde::Serialize;
use std::time::Duration;

/// Body of `GET /update`.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Refresh interval in milliseconds.
    pub interval: u64,
    /// Rendered output fragment.
    pub content: String,
}

impl UpdateResponse {
    /// Create a response for the given interval and fragment.
    pub fn new(interval: Duration, content: String) -> Self {
        Self {
            interval: interval.as_millis() as u64,
            content,
        }
    }
}
