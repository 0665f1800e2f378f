//! Executor loop.
//!
//! The [`Executor`] runs the watched command on a fixed schedule and
//! publishes each result into [`WatchState`]:
//! - The first run starts immediately
//! - Run `n` is due at `start + n * interval`; an overrun makes the next run
//!   fire right away instead of pushing every later run back
//! - Failed runs are published like successful ones
//! - Cancellation kills an in-flight run and discards its result

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::result::ExecutionResult;
use crate::render::markup;
use crate::store::WatchState;

use super::command::{CommandOutcome, CommandRunner};

/// Handle for stopping a running executor loop.
#[derive(Debug, Clone)]
pub struct ExecutorHandle {
    cancel: CancellationToken,
}

impl ExecutorHandle {
    /// Stop the loop, killing any in-flight run.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Check if shutdown was requested.
    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Periodically runs the configured command and publishes its results.
pub struct Executor {
    state: Arc<WatchState>,
    runner: CommandRunner,
    cancel: CancellationToken,
}

impl Executor {
    /// Create an executor for the command held by `state`.
    pub fn new(state: Arc<WatchState>) -> Self {
        let runner = CommandRunner::new(state.config().command().clone());
        Self {
            state,
            runner,
            cancel: CancellationToken::new(),
        }
    }

    /// Observe an externally owned cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Spawn the loop and return a handle for stopping it.
    pub fn start(self) -> (ExecutorHandle, JoinHandle<()>) {
        let handle = ExecutorHandle {
            cancel: self.cancel.clone(),
        };

        let task = tokio::spawn(async move {
            self.run().await;
        });

        (handle, task)
    }

    /// Main executor loop.
    async fn run(self) {
        let config = Arc::clone(self.state.config());
        let interval = config.interval();
        let mut next = Instant::now();
        let mut cycle: u64 = 0;

        tracing::info!(
            command = %config.command(),
            interval = ?interval,
            "Executor loop started"
        );

        loop {
            next += interval;
            let started = Instant::now();

            let Some(outcome) = self.runner.run(&self.cancel).await else {
                tracing::debug!(cycle = cycle + 1, "In-flight run cancelled, discarding result");
                break;
            };
            if self.cancel.is_cancelled() {
                break;
            }

            cycle += 1;
            let elapsed = started.elapsed();
            log_outcome(cycle, elapsed, &outcome);

            let result = to_result(outcome, cycle, config.color());
            self.state.publish(result);

            if Instant::now() > next {
                tracing::warn!(
                    cycle,
                    elapsed = ?elapsed,
                    interval = ?interval,
                    "Run overran the interval, starting the next one immediately"
                );
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep_until(next) => {}
            }
        }

        tracing::info!(cycles = cycle, "Executor loop stopped");
    }
}

fn log_outcome(cycle: u64, elapsed: Duration, outcome: &CommandOutcome) {
    match &outcome.failure {
        None => tracing::debug!(
            cycle,
            elapsed = ?elapsed,
            bytes = outcome.output.len(),
            "Run completed"
        ),
        Some(e) => tracing::warn!(
            cycle,
            elapsed = ?elapsed,
            bytes = outcome.output.len(),
            error = %e,
            "Run failed"
        ),
    }
}

fn to_result(outcome: CommandOutcome, cycle: u64, color: bool) -> ExecutionResult {
    ExecutionResult {
        output: markup::to_markup(&outcome.output, color),
        failure: outcome.failure.map(|e| e.to_string()),
        completed_at: Some(Local::now()),
        cycle,
    }
}
