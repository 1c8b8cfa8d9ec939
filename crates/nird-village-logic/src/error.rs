//! Error types for the village logic.
//!
//! Player mistakes (wrong bin, wrong answer) are not errors: they cost
//! points and the game goes on. Errors here cover actions the game cannot
//! interpret at all, storage failures, and persisted state that no longer
//! matches the schema.

use thiserror::Error;

/// An action a mini-game cannot apply in its current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("unknown bin: {0}")]
    UnknownBin(String),

    #[error("item {0} has already been placed")]
    AlreadyPlaced(String),

    #[error("option {index} out of range ({count} options)")]
    OptionOutOfRange { index: usize, count: usize },

    #[error("empty command")]
    EmptyCommand,

    #[error("unknown distribution: {0}")]
    UnknownDistro(String),

    /// The action belongs to another phase of the game.
    #[error("action not allowed during the {0} phase")]
    WrongPhase(&'static str),

    #[error("game already completed")]
    AlreadyCompleted,

    /// The action targets a different mini-game variant than the open one.
    #[error("action does not apply to a {0} game")]
    WrongGame(&'static str),
}

/// Failure of the underlying key/value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A persisted key whose content does not match the expected shape.
///
/// Never surfaced to callers of the progress store: the key is dropped and
/// its default value used instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("corrupted state under key `{key}`: {reason}")]
pub struct CorruptedStateError {
    pub key: &'static str,
    pub reason: String,
}

impl CorruptedStateError {
    pub fn new(key: &'static str, reason: impl Into<String>) -> Self {
        Self {
            key,
            reason: reason.into(),
        }
    }
}

/// Configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by the village controller.
#[derive(Debug, Error)]
pub enum VillageError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("no building is open")]
    NoOpenActivity,

    #[error("no age group selected")]
    NoAgeSelected,
}
