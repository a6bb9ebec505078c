//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::inference::InferenceError;
use crate::knowledge::KnowledgeError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Knowledge base could not be loaded
    KnowledgeError,
    /// Bad input for a consultation
    InputError,
    /// Engine refused the operation
    InferenceError,
    /// Boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "EXPERT_CLI_CONFIG_ERROR",
            Self::IoError => "EXPERT_CLI_IO_ERROR",
            Self::KnowledgeError => "EXPERT_CLI_KNOWLEDGE_ERROR",
            Self::InputError => "EXPERT_CLI_INPUT_ERROR",
            Self::InferenceError => "EXPERT_CLI_INFERENCE_ERROR",
            Self::BootFailed => "EXPERT_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid user input
    pub fn input_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InputError, msg)
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<KnowledgeError> for CliError {
    fn from(e: KnowledgeError) -> Self {
        Self::new(CliErrorCode::KnowledgeError, e.to_string())
    }
}

impl From<InferenceError> for CliError {
    fn from(e: InferenceError) -> Self {
        Self::new(CliErrorCode::InferenceError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
