//! Error types for the todoshare ecosystem.

use thiserror::Error;

/// Errors that can occur in todoshare operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Task list not found: {0}")]
    ListNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Whether this error means "the thing you asked for doesn't exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::ListNotFound(_) | CoreError::TaskNotFound(_) | CoreError::ContactNotFound(_)
        )
    }
}

/// Result type alias for todoshare operations.
pub type CoreResult<T> = Result<T, CoreError>;
