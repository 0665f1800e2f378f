//! Configuration types.

use std::time::Duration;

use crate::core::command::CommandSpec;

use super::builder::WatchConfigBuilder;

/// Shortest allowed update interval. Smaller values are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Update interval used when none is given.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Listen address used when none is given.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8000";

/// Time the HTTP server gets to drain in-flight requests on shutdown.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Immutable runtime configuration.
///
/// Built through [`WatchConfig::builder`], which validates the command and
/// clamps the interval to [`MIN_INTERVAL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub(super) command: CommandSpec,
    pub(super) interval: Duration,
    pub(super) no_title: bool,
    pub(super) color: bool,
    pub(super) address: String,
}

impl WatchConfig {
    /// Create a builder for the given command line.
    pub fn builder<I, S>(command: I) -> WatchConfigBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WatchConfigBuilder::new(command)
    }

    /// The command being watched.
    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Effective update interval (never below [`MIN_INTERVAL`]).
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the header line is suppressed.
    pub fn no_title(&self) -> bool {
        self.no_title
    }

    /// Whether ANSI color sequences are interpreted.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Address the HTTP server binds to.
    pub fn address(&self) -> &str {
        &self.address
    }
}
