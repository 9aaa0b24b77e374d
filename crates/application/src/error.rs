//! Application error types

use thiserror::Error;

use courier_domain::DomainError;

use crate::executor::ExecuteError;
use crate::ports::{PreferenceError, StoreError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A backing store operation failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Local preferences could not be read or written.
    #[error("preferences error: {0}")]
    Preferences(#[from] PreferenceError),

    /// Running a request failed.
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An operation needs a selected project.
    #[error("no project selected")]
    NoProjectSelected,

    /// Input rejected before reaching the store.
    #[error("{0}")]
    Validation(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
