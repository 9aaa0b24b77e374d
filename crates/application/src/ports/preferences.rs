//! Local preference port
//!
//! A small client-side key/value space that is never synced to the store.

use async_trait::async_trait;

/// Errors that can occur while reading or writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// String key/value storage.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Reads a value.
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Writes a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Removes a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}
