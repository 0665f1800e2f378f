//! Command execution.
//!
//! This module provides the command runner and the periodic executor loop
//! that feeds [`WatchState`](crate::store::WatchState).

mod command;
mod executor;

pub use command::{CommandError, CommandOutcome, CommandRunner};
pub use executor::{Executor, ExecutorHandle};
