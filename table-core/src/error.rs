//! FILENAME: table-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    /// A summarizer, renderer or bottom-row function reported a failure.
    #[error("Callback failed for column '{column}': {message}")]
    Callback { column: String, message: String },

    #[error("Column not found: {0}")]
    UnknownColumn(String),

    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    pub fn callback(column: impl Into<String>, message: impl Into<String>) -> Self {
        TableError::Callback {
            column: column.into(),
            message: message.into(),
        }
    }
}
