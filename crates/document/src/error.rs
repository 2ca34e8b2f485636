//! Document errors

use thiserror::Error;

/// Errors from tree mutation and report assembly
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported structure: cannot {operation} on leaf '{node}'")]
    UnsupportedStructure {
        node: String,
        operation: &'static str,
    },
}

/// Result type alias with DocumentError
pub type DocumentResult<T> = Result<T, DocumentError>;

impl DocumentError {
    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        DocumentError::Validation(reason.into())
    }

    /// Create a leaf structure error
    pub fn unsupported(node: &str, operation: &'static str) -> Self {
        DocumentError::UnsupportedStructure {
            node: node.to_string(),
            operation,
        }
    }
}
