//! # Session Errors

use thiserror::Error;

use crate::inference::InferenceError;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session registry errors
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// No consultation registered for the key
    #[error("No active consultation for session: {0}")]
    NotFound(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            SessionError::NotFound(_) => 404,
            SessionError::Inference(_) => 409,
            SessionError::Internal(_) => 500,
        }
    }
}
