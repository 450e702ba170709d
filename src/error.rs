//! Error types for the memory match engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid engine state: {0}")]
    State(String),

    #[error("AI has no selectable card left")]
    NoMovesAvailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MemoryError>;
