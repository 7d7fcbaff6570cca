//! Error types for the card-matching engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Card not found: {0}")]
    CardNotFound(u32),

    #[error("Invalid level format: {0}")]
    InvalidLevelFormat(String),

    #[error("Corrupt undo history: {0}")]
    CorruptHistory(String),

    #[error("Inconsistent table state: {0}")]
    InconsistentState(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
