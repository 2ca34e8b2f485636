//! Facade errors
//!
//! Lower-layer errors pass through unchanged so callers can match the
//! original variant.

use thiserror::Error;

use serf_core::CoreError;
use serf_document::DocumentError;
use serf_security::SecurityError;
use serf_templates::TemplateError;

/// Failure reported by a data collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid data from source: {0}")]
    InvalidData(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum FacadeError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Security(#[from] SecurityError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type FacadeResult<T> = Result<T, FacadeError>;
