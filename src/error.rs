//! Custom error types for scriber-register
//!
//! This module defines the error hierarchy for the wizard using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for registration wizard operations
#[derive(Error, Debug)]
pub enum RegisterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Local store read/write errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A step submission did not pass the Continue gate
    #[error("Validation error: {0}")]
    Validation(String),

    /// A path could not be mapped to a wizard step
    #[error("Invalid route: {0}")]
    Route(String),

    /// No step in the catalog matches the requested position
    #[error("Step not found: {0}")]
    StepNotFound(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl RegisterError {
    /// Create a "step not found" error for a step id
    pub fn step_not_found(step_id: impl Into<String>) -> Self {
        Self::StepNotFound(step_id.into())
    }

    /// Check if this is a "step not found" error
    pub fn is_step_not_found(&self) -> bool {
        matches!(self, Self::StepNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for RegisterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegisterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for registration wizard operations
pub type RegisterResult<T> = Result<T, RegisterError>;
