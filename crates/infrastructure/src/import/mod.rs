//! Collection import.

pub mod postman;

pub use postman::{ImportWarning, ParsedCollection, parse_collection};

/// Errors raised while reading a collection document.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The document is not JSON at all.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The document is JSON but not a collection.
    #[error("Invalid Postman collection format.")]
    InvalidFormat,
}
