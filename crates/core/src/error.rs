//! Core errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from currency normalization and configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Invalid rate for {code}: {rate} (must be positive)")]
    InvalidRate { code: String, rate: Decimal },

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Amount overflow: {0}")]
    Overflow(String),

    #[error("Rate for base currency {0} is fixed at 1")]
    BaseCurrencyRate(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        CoreError::Config(reason.into())
    }

    /// Create an arithmetic overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        CoreError::Overflow(operation.into())
    }

    /// Check if this is an unsupported currency error
    pub fn is_unsupported_currency(&self) -> bool {
        matches!(self, CoreError::UnsupportedCurrency(_))
    }
}
