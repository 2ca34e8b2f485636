//! Template errors

use serf_core::ReportKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unknown template kind: {0}")]
    UnknownTemplateKind(ReportKind),
}

pub type TemplateResult<T> = Result<T, TemplateError>;
