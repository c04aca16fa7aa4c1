use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while working with the home registry and its documents.
#[derive(Debug, Error)]
pub enum HomeError {
    /// The referenced home does not exist in the namespace that was searched.
    #[error("home not found: {0}")]
    NotFound(String),

    /// A personal home insert was refused because the account already holds `max` homes.
    #[error("home limit reached (max {max})")]
    CapacityExceeded { max: usize },

    /// A personal teleport was attempted before the cooldown window elapsed.
    #[error("on cooldown: {remaining_secs}s remaining")]
    OnCooldown { remaining_secs: i64 },

    /// Home names must contain at least one non-whitespace character.
    #[error("invalid home name: {0:?}")]
    InvalidName(String),

    /// Reading or writing a persisted document failed.
    #[error("persistence failure for {}: {source}", path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be encoded or parsed as JSON.
    #[error("json error for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One stored entry could not be decoded; the rest of the document is still usable.
    #[error("corrupt record at {path}: {reason}")]
    CorruptRecord { path: String, reason: String },
}

impl HomeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistenceFailure {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::CorruptRecord {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
