//! Error types for the directory.

use crate::types::EmployeeId;
use thiserror::Error;

/// Main error type for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("Duplicate employee id: {0}")]
    DuplicateEmployee(EmployeeId),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DirectoryError {
    fn from(e: serde_json::Error) -> Self {
        DirectoryError::Serialization(e.to_string())
    }
}

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
