//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body type tag is not one of the known kinds.
    #[error("unknown body type: {0}")]
    UnknownBodyType(String),

    /// The export format name is not recognized.
    #[error("unknown export format: {0}")]
    UnknownExportFormat(String),

    /// A required field was left empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
