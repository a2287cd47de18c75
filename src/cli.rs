//! CLI command implementations for tankbot.

pub(crate) mod check_config;
pub(crate) mod logging;
pub(crate) mod play;
pub(crate) mod replay;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;

use tankbot::{BotError, ConfigError, PolicyConfig};

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// One line per turn plus a summary.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Log format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BotError> for CliError {
    fn from(e: BotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("Failed to encode JSON: {e}"))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        Self::new(format!("Failed to encode TOML: {e}"))
    }
}

/// Load the policy configuration, or the defaults when no file is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<PolicyConfig, CliError> {
    match path {
        Some(path) => {
            let config = PolicyConfig::load(path)?;
            tracing::info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(PolicyConfig::default()),
    }
}
