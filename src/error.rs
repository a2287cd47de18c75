//! Error types for the bot.
//!
//! Everything here is fatal to the session: the turn loop stops on the first
//! error and the process exits non-zero. Transient conditions (the controlled
//! tank missing for a turn, deletion of an unknown id) are not errors.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::world::ObjectKind;

/// Stage of the session a message was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The first message, carrying the tank identifiers.
    Handshake,
    /// Pre-game object snapshots, up to the end-of-init sentinel.
    Init,
    /// Per-turn deltas, up to the end-of-session sentinel.
    Turn,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Handshake => write!(f, "handshake"),
            Phase::Init => write!(f, "init"),
            Phase::Turn => write!(f, "turn"),
        }
    }
}

/// Malformed or out-of-order protocol traffic.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Input closed before the session-end sentinel.
    #[error("input ended during {phase} before the session-end signal")]
    UnexpectedEof {
        /// Phase that was waiting for input.
        phase: Phase,
    },
    /// A sentinel arrived where a payload was expected (or the wrong one).
    #[error("unexpected {signal} signal during {phase}")]
    UnexpectedSignal {
        /// The sentinel that was read.
        signal: &'static str,
        /// Phase it was read in.
        phase: Phase,
    },
    /// The payload was not valid JSON of the expected shape.
    #[error("malformed {phase} message: {source}")]
    Malformed {
        /// Phase the message was read in.
        phase: Phase,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// An object's `type` code is outside the known taxonomy.
    #[error("unknown object type code {0}")]
    UnknownObjectKind(u8),
    /// An object's position shape does not fit its kind.
    #[error("object {id} of kind {kind:?} has a {found} position")]
    ShapeMismatch {
        /// Object identifier.
        id: String,
        /// Declared kind.
        kind: ObjectKind,
        /// `"point"` or `"polygon"`.
        found: &'static str,
    },
}

/// World model precondition violations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    /// Init finished without any boundary object, so the map has no size.
    #[error("no boundary objects received during init")]
    NoBoundary,
    /// Map bounds are fixed once computed.
    #[error("map bounds were already computed")]
    BoundsAlreadyComputed,
}

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Top-level error for a bot session.
#[derive(Debug, Error)]
pub enum BotError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Protocol violation.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// World model error.
    #[error("world error: {0}")]
    World(#[from] WorldError),
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// An action could not be encoded.
    #[error("failed to encode action: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type for bot operations.
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::UnexpectedSignal {
            signal: "END",
            phase: Phase::Init,
        };
        assert_eq!(err.to_string(), "unexpected END signal during init");

        let err = ProtocolError::UnexpectedEof { phase: Phase::Turn };
        assert!(err.to_string().contains("turn"));
    }

    #[test]
    fn test_bot_error_wraps_world_error() {
        let err: BotError = WorldError::NoBoundary.into();
        assert_eq!(
            err.to_string(),
            "world error: no boundary objects received during init"
        );
    }
}
