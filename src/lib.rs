//! httpwatch - run a command periodically and serve its latest output
//! on an auto-refreshing web page.

pub mod api;
pub mod config;
pub mod core;
pub mod execution;
pub mod render;
pub mod store;

pub use api::{ApiState, ServerHandle, build_router, start_server};
pub use config::{ConfigError, WatchConfig};
pub use core::command::CommandSpec;
pub use core::result::ExecutionResult;
pub use execution::{CommandError, CommandOutcome, CommandRunner, Executor, ExecutorHandle};
pub use render::{RenderError, Renderer};
pub use store::WatchState;
