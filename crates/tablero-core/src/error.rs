//! Error types for tablero

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Checklist not found: {0}")]
    ChecklistNotFound(String),

    #[error("Check item not found: {0}")]
    CheckItemNotFound(String),

    #[error("Feed error: {0}")]
    Feed(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid check item state: {0}")]
    InvalidState(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
