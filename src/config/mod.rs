//! Runtime configuration.
//!
//! The configuration is assembled once at startup and shared read-only
//! with the executor loop and the HTTP front end.

mod builder;
mod error;
mod types;

pub use builder::{WatchConfigBuilder, parse_interval};
pub use error::ConfigError;
pub use types::{
    DEFAULT_ADDRESS, DEFAULT_INTERVAL, MIN_INTERVAL, SHUTDOWN_GRACE_PERIOD, WatchConfig,
};
