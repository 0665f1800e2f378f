//! Builder for [`WatchConfig`].

use std::time::Duration;

use crate::core::command::CommandSpec;

use super::error::ConfigError;
use super::types::{DEFAULT_ADDRESS, DEFAULT_INTERVAL, MIN_INTERVAL, WatchConfig};

/// Builder for creating a validated [`WatchConfig`].
#[derive(Debug, Clone)]
pub struct WatchConfigBuilder {
    command: Vec<String>,
    interval: Duration,
    no_title: bool,
    color: bool,
    address: String,
}

impl WatchConfigBuilder {
    /// Create a new builder with the given command line.
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
            interval: DEFAULT_INTERVAL,
            no_title: false,
            color: false,
            address: DEFAULT_ADDRESS.to_string(),
        }
    }

    /// Set the update interval.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Suppress the header line.
    pub fn no_title(mut self, no_title: bool) -> Self {
        self.no_title = no_title;
        self
    }

    /// Interpret ANSI color sequences.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Set the listen address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<WatchConfig, ConfigError> {
        let command = CommandSpec::new(self.command)?;

        let address = self.address.trim().to_string();
        if address.is_empty() {
            return Err(ConfigError::InvalidAddress(self.address));
        }

        let interval = if self.interval < MIN_INTERVAL {
            tracing::debug!(
                requested = ?self.interval,
                effective = ?MIN_INTERVAL,
                "Interval below minimum, raising to the floor"
            );
            MIN_INTERVAL
        } else {
            self.interval
        };

        Ok(WatchConfig {
            command,
            interval,
            no_title: self.no_title,
            color: self.color,
            address,
        })
    }
}

/// Parse an interval given on the command line.
///
/// Plain numbers are seconds (`2`, `0.5`); anything else goes through
/// `parse_duration` (`500ms`, `1m30s`).
pub fn parse_interval(value: &str) -> Result<Duration, ConfigError> {
    let trimmed = value.trim();

    if let Ok(secs) = trimmed.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidInterval {
            value: value.to_string(),
            reason: e.to_string(),
        });
    }

    parse_duration::parse(trimmed).map_err(|e| ConfigError::InvalidInterval {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
