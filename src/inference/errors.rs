//! Inference error types
//!
//! Questions and unresolved cycles are outcomes, not errors. The only
//! caller error is answering when no proof has been started.

use thiserror::Error;

/// Result type for inference operations
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Inference errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// `supply_answer` called before any `prove_goal`
    #[error("No active proof: start a query before answering '{variable}'")]
    NoActiveProof { variable: String },
}

impl InferenceError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            InferenceError::NoActiveProof { .. } => "EXPERT_NO_ACTIVE_PROOF",
        }
    }
}
