//! Outcome of a single execution cycle.

use chrono::{DateTime, Local};

/// The published result of one run of the watched command.
///
/// Each cycle produces a fresh value that replaces the previous one whole.
/// The default value stands in until the first run completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured stdout and stderr, already converted to markup.
    pub output: String,
    /// Why the run failed, if it did.
    pub failure: Option<String>,
    /// When the run finished. `None` before the first run.
    pub completed_at: Option<DateTime<Local>>,
    /// 1-based cycle number, `0` before the first run.
    pub cycle: u64,
}

impl ExecutionResult {
    /// Check whether this is the placeholder published before the first run.
    pub fn is_initial(&self) -> bool {
        self.cycle == 0
    }
}
