//! Error types for the game engine.

use std::path::PathBuf;

use qd_core::RosterError;
use thiserror::Error;

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while running a game session.
///
/// None of these are fatal: a failed operation leaves the session exactly as
/// it was.
#[derive(Debug, Error)]
pub enum GameError {
    /// A draw was requested with no participants.
    #[error("no participants to draw from")]
    EmptyRoster,

    /// Every question in the pool has been asked.
    #[error("no questions left in the pool")]
    ExhaustedPool,

    /// A new draw was requested before the last pick was judged.
    #[error("the current pick has not been judged yet")]
    JudgmentPending,

    /// A verdict was recorded while no pick was waiting for one.
    #[error("no pick is waiting for a verdict")]
    NotAwaitingJudgment,

    /// The configuration cannot run a game.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A question file could not be read.
    #[error("failed to read question file {}: {source}", .path.display())]
    QuestionFileIo {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A question file is not a JSON array of strings.
    #[error("failed to parse question file {}: {source}", .path.display())]
    QuestionFileParse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Roster operation failed.
    #[error("{0}")]
    Roster(#[from] RosterError),
}
