//! Error type for headless runs.

use thiserror::Error;

use barony_core::error::GameError;

/// Result type alias using [`RunnerError`].
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors from loading run files or playing a headless game.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// A configuration or script file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Failed to read a file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse a RON configuration or script.
    #[error("Failed to parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    /// Failed to write a JSON summary.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The game rejected a decision.
    #[error("Decision rejected: {0}")]
    Game(#[from] GameError),
}
