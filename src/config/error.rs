//! Configuration error types.
//!
//! This module defines error types for building and validating the watch configuration.

use thiserror::Error;

/// Errors that can occur when building the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No command was given to watch.
    #[error("no command specified")]
    MissingCommand,

    /// The listen address is unusable.
    #[error("invalid listen address: {0:?}")]
    InvalidAddress(String),

    /// The update interval could not be parsed.
    #[error("invalid interval '{value}': {reason}")]
    InvalidInterval { value: String, reason: String },
}
