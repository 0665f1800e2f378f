//! Shared watch state.
//!
//! [`WatchState`] pairs the immutable configuration with the latest
//! [`ExecutionResult`]. The executor loop is the only writer; HTTP handlers
//! take snapshots.
//!
//! The result lives behind an `RwLock<Arc<_>>`. A write swaps the pointer,
//! a read clones it, so neither side holds the lock while rendering or doing
//! I/O and a reader can never see fields from two different cycles.

use std::sync::{Arc, RwLock};

use crate::config::WatchConfig;
use crate::core::result::ExecutionResult;

/// The single shared cell holding the most recent execution result.
#[derive(Debug)]
pub struct WatchState {
    config: Arc<WatchConfig>,
    latest: RwLock<Arc<ExecutionResult>>,
}

impl WatchState {
    /// Create state holding the placeholder result.
    pub fn new(config: Arc<WatchConfig>) -> Self {
        Self {
            config,
            latest: RwLock::new(Arc::new(ExecutionResult::default())),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &Arc<WatchConfig> {
        &self.config
    }

    /// Get a consistent view of the latest result.
    pub fn snapshot(&self) -> Arc<ExecutionResult> {
        // The guarded value is a single pointer, so a poisoned lock still holds a whole result.
        let latest = self.latest.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&latest)
    }

    /// Replace the latest result.
    pub fn publish(&self, result: ExecutionResult) {
        let result = Arc::new(result);
        let mut latest = self.latest.write().unwrap_or_else(|e| e.into_inner());
        *latest = result;
    }
}
