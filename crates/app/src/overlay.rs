//! Preference store with per-invocation overrides.

use std::collections::BTreeMap;

use async_trait::async_trait;

use courier_application::ports::{PreferenceError, PreferenceStore};

/// Reads overridden keys from memory and everything else from `inner`.
/// Writes always go to `inner`.
#[derive(Debug)]
pub struct OverlayPreferences<P> {
    inner: P,
    overrides: BTreeMap<String, String>,
}

impl<P: PreferenceStore> OverlayPreferences<P> {
    /// Wraps `inner` without overrides.
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            overrides: BTreeMap::new(),
        }
    }

    /// Overrides `key` for reads.
    #[must_use]
    pub fn with_override(mut self, key: &str, value: impl Into<String>) -> Self {
        self.overrides.insert(key.to_string(), value.into());
        self
    }
}

#[async_trait]
impl<P: PreferenceStore> PreferenceStore for OverlayPreferences<P> {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        if let Some(value) = self.overrides.get(key) {
            return Ok(Some(value.clone()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.inner.remove(key).await
    }
}
