//! # Knowledge Errors

use thiserror::Error;

/// Result type for knowledge-base operations
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Knowledge-base errors
///
/// All of these are recoverable validation errors reported to the caller.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Malformed definition: {0}")]
    Malformed(String),

    #[error("Rule already exists: {0}")]
    DuplicateRule(String),

    #[error("Variable already exists: {0}")]
    DuplicateVariable(String),

    #[error("Rule not found: {0}")]
    RuleNotFound(String),

    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl KnowledgeError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            KnowledgeError::Malformed(_) => 400,
            KnowledgeError::DuplicateRule(_) => 409,
            KnowledgeError::DuplicateVariable(_) => 409,
            KnowledgeError::RuleNotFound(_) => 404,
            KnowledgeError::VariableNotFound(_) => 404,
            KnowledgeError::Io { .. } => 500,
            KnowledgeError::Json { .. } => 400,
        }
    }
}
