use thiserror::Error;

use mpsystem_core::DomainError;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Malformed filter input (unparseable date, unknown status, unknown report).
    #[error("{0}")]
    Validation(String),

    /// Rendering an export failed.
    #[error("export failed: {0}")]
    Export(String),
}

impl ReportError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<DomainError> for ReportError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}
