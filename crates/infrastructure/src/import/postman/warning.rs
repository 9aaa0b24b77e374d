//! Import warnings.

use std::fmt;

/// Something the parser skipped or adjusted while reading a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    /// Path to the problematic item (e.g. "collection/folder/request")
    pub path: String,
    /// Human-readable description of the issue
    pub message: String,
}

impl ImportWarning {
    /// Creates a warning.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
