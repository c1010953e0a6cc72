//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Request could not reach the backend or failed in transport
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend rejected the request with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Missing or rejected credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Client-side input invalid, no request was issued
    #[error("invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    /// Target column is at its WIP limit
    #[error("column '{column_id}' is at its WIP limit ({count}/{limit})")]
    WipLimitExceeded {
        column_id: String,
        limit: usize,
        count: usize,
    },

    /// A move for this task is already outstanding
    #[error("task {id} already has a move in flight")]
    MoveInFlight { id: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an API error from a status code and message body
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a client-side constraint rejection.
    ///
    /// Constraint errors are produced before any mutation or network call
    /// and are surfaced to the user rather than logged as failures.
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            Self::WipLimitExceeded { .. } | Self::MoveInFlight { .. } | Self::Validation { .. }
        )
    }
}
