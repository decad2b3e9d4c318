//! Engine error type.
//!
//! Every fallible operation in the crate returns [`Result`]. Variants are
//! grouped by who is at fault:
//!
//! - caller input: `IllegalMove`, `MalformedCode`, `InvalidState`, `TerminalState`
//! - configuration: `InvalidConfig`, `ZeroBudget`, `UnsupportedBudget`, `ConfigParse`
//! - persistence: `Transcript`, `Io`, `Snapshot`

use std::path::PathBuf;

use derive_more::{Display, Error};

use super::action::Move;
use super::player::Side;
use crate::search::SearchBudget;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the engine.
#[derive(Debug, Display, Error)]
pub enum EngineError {
    /// The move is not in the side's legal move list for the position.
    #[display("illegal move {mv} for {side}")]
    IllegalMove { mv: Move, side: Side },

    /// A move code that cannot describe a move on this board.
    #[display("malformed move code {code:#04x}: {reason}")]
    MalformedCode { code: u8, reason: &'static str },

    #[display("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A position that breaks a board invariant.
    #[display("invalid game state: {message}")]
    InvalidState { message: String },

    /// The game already has a winner.
    #[display("game is over, {winner} has won")]
    TerminalState { winner: Side },

    #[display("search budget must allow at least one unit of work")]
    ZeroBudget,

    #[display("{strategy} search does not accept a {budget} budget")]
    UnsupportedBudget {
        budget: SearchBudget,
        strategy: &'static str,
    },

    #[display("transcript line {line}: {message}")]
    Transcript { line: usize, message: String },

    #[display("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[display("snapshot encoding failed: {source}")]
    Snapshot { source: bincode::Error },

    #[display("config parse error: {source}")]
    ConfigParse { source: toml::de::Error },
}

impl EngineError {
    /// Create an `InvalidConfig` error.
    #[track_caller]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an `InvalidState` error.
    #[track_caller]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        EngineError::InvalidState {
            message: message.into(),
        }
    }

    /// Create an `Io` error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<bincode::Error> for EngineError {
    fn from(source: bincode::Error) -> Self {
        EngineError::Snapshot { source }
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(source: toml::de::Error) -> Self {
        EngineError::ConfigParse { source }
    }
}
