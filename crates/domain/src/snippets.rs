//! Locally saved JSON comparisons and JWT samples.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;

/// A named pair of JSON documents kept for later diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedComparison {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Left document
    pub json_a: String,
    /// Right document
    pub json_b: String,
}

impl SavedComparison {
    /// Creates a comparison. The name and at least one side must be non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] when a required field is blank.
    pub fn new(
        name: impl Into<String>,
        json_a: impl Into<String>,
        json_b: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let json_a = json_a.into();
        let json_b = json_b.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("comparison name"));
        }
        if json_a.trim().is_empty() && json_b.trim().is_empty() {
            return Err(DomainError::EmptyField("comparison content"));
        }
        Ok(Self {
            id: generate_id(),
            name,
            json_a,
            json_b,
        })
    }
}

/// A named JWT kept for later decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedToken {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Encoded token
    pub token: String,
}

impl SavedToken {
    /// Creates a saved token.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] when the name or token is blank.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let token = token.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("token name"));
        }
        if token.trim().is_empty() {
            return Err(DomainError::EmptyField("token"));
        }
        Ok(Self {
            id: generate_id(),
            name,
            token: token.trim().to_string(),
        })
    }
}
