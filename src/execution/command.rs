//! External command execution.
//!
//! [`CommandRunner`] spawns the watched program directly (no shell) with
//! stdout and stderr both connected to the write end of one pipe, so the
//! captured buffer keeps the order in which the process wrote. It then
//! reports how the process ended.
//!
//! # Cancellation
//!
//! [`CommandRunner::run`] races the process against a [`CancellationToken`].
//! When the token fires first the child is killed and reaped and `None` is
//! returned, so a cancelled run never produces a result. The child is also
//! spawned with `kill_on_drop`, so dropping the future kills it as well.
//!
//! # Failures
//!
//! A run that fails still yields a [`CommandOutcome`]: whatever output was
//! captured plus a [`CommandError`] describing the failure.
//!
//! - **Spawn failure**: [`CommandError::Spawn`] (e.g. program not found)
//! - **Non-zero exit**: [`CommandError::Exit`] with the exit code
//! - **Killed by a signal**: [`CommandError::Signal`]
//! - **Pipe error**: [`CommandError::Io`]

use std::os::fd::OwnedFd;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::net::unix::pipe;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use crate::core::command::CommandSpec;

/// Errors describing why a command run failed.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading output or waiting for the process failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The process exited with a non-zero code.
    #[error("exit status {0}")]
    Exit(i32),

    /// The process was terminated by a signal.
    #[error("terminated by signal")]
    Signal,
}

/// Captured output and failure, if any, of one completed run.
#[derive(Debug)]
pub struct CommandOutcome {
    /// Combined stdout and stderr bytes.
    pub output: Vec<u8>,
    /// Why the run failed.
    pub failure: Option<CommandError>,
}

impl CommandOutcome {
    fn failed(output: Vec<u8>, error: CommandError) -> Self {
        Self {
            output,
            failure: Some(error),
        }
    }
}

/// Runs a [`CommandSpec`] to completion.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    spec: CommandSpec,
}

impl CommandRunner {
    /// Create a runner for the given command.
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }

    /// Run the command once.
    ///
    /// Returns `None` if `cancel` fired before the command finished.
    pub async fn run(&self, cancel: &CancellationToken) -> Option<CommandOutcome> {
        let (mut child, output) = match self.spawn() {
            Ok(spawned) => spawned,
            Err(error) => return Some(CommandOutcome::failed(Vec::new(), error)),
        };

        let completed = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            outcome = wait_with_output(&mut child, output) => Some(outcome),
        };

        if completed.is_none() {
            tracing::debug!(command = %self.spec, "Run cancelled, killing process");
            if let Err(e) = child.kill().await {
                tracing::warn!(command = %self.spec, error = %e, "Failed to kill cancelled process");
            }
        }

        completed
    }

    /// Start the process with stdout and stderr sharing one pipe.
    fn spawn(&self) -> Result<(Child, pipe::Receiver), CommandError> {
        let (reader, writer) = std::io::pipe()?;

        let mut cmd = Command::new(self.spec.program());
        cmd.args(self.spec.args())
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer)
            .kill_on_drop(true);

        let spawned = cmd.spawn();
        // The command holds the parent's copies of the write end; EOF only
        // arrives once they are closed.
        drop(cmd);

        let child = spawned.map_err(|source| CommandError::Spawn {
            program: self.spec.program().to_string(),
            source,
        })?;
        let output = pipe::Receiver::from_owned_fd(OwnedFd::from(reader))?;

        Ok((child, output))
    }
}

/// Read the pipe to EOF, then wait for the exit status.
async fn wait_with_output(child: &mut Child, mut reader: pipe::Receiver) -> CommandOutcome {
    let mut output = Vec::new();

    if let Err(e) = reader.read_to_end(&mut output).await {
        return CommandOutcome::failed(output, CommandError::Io(e));
    }

    match child.wait().await {
        Ok(status) => CommandOutcome {
            output,
            failure: exit_failure(status),
        },
        Err(e) => CommandOutcome::failed(output, CommandError::Io(e)),
    }
}

fn exit_failure(status: ExitStatus) -> Option<CommandError> {
    if status.success() {
        return None;
    }
    Some(match status.code() {
        Some(code) => CommandError::Exit(code),
        None => CommandError::Signal,
    })
}
