//! Security layer errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("Integrity check failed: expected hash {expected}, got {actual}")]
    Integrity { expected: String, actual: String },

    #[error("Cannot decode content: {0}")]
    Decode(String),
}

pub type SecurityResult<T> = Result<T, SecurityError>;

impl SecurityError {
    pub fn decode(reason: impl Into<String>) -> Self {
        SecurityError::Decode(reason.into())
    }
}
