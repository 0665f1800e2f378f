//! The command line being watched.

use std::fmt;

use crate::config::ConfigError;

/// Program name plus arguments. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec(Vec<String>);

impl CommandSpec {
    /// Create a command spec, rejecting an empty command line.
    pub fn new<I, S>(argv: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            return Err(ConfigError::MissingCommand);
        }
        Ok(Self(argv))
    }

    /// Get the program to execute.
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    /// Get the arguments following the program.
    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}
