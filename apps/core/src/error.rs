use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// The supplied prompt is not a string (missing, null, number, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Represents data validation errors at the host boundary (e.g., blank prompt).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents failures talking to the panel actor, such as a disposed panel.
    #[error("Panel error: {0}")]
    Panel(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl AppError {
    /// Whether the caller can fix the error by changing its input
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidInput(_) | AppError::Validation(_))
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
