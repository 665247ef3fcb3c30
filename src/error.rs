//! Error types for the engine and the question-bank adapter.
//!
//! Invalid player actions are not errors: the state machine ignores them.
//! Only the conditions below are surfaced to callers.

use thiserror::Error;

use crate::domain::Tier;

/// Errors raised by the game engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A tier of the bank cannot fill its share of a session.
    #[error("not enough questions for tier {tier}: {available} available, {required} required")]
    InsufficientQuestions {
        tier: Tier,
        available: usize,
        required: usize,
    },

    /// `start` was called before any question bank was loaded.
    #[error("question bank is empty")]
    EmptyBank,

    /// Money ladder lookup outside positions 0..15.
    #[error("money ladder position {0} out of range")]
    LevelOutOfRange(usize),
}

/// Errors produced while loading a question bank.
#[derive(Debug, Error)]
pub enum BankLoadError {
    /// The bank file could not be read.
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The bank file is not valid TOML for the bank schema.
    #[error("failed to parse question bank {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A question violates a structural invariant.
    #[error("invalid question '{id}': {reason}")]
    InvalidQuestion { id: String, reason: String },
}

/// Errors seen by callers addressing a live game through its runner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error(transparent)]
    Game(#[from] GameError),

    /// The game's task has shut down.
    #[error("game runner has stopped")]
    Stopped,
}
