//! Typed access to local preferences.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use courier_domain::{SavedComparison, SavedToken};

use crate::ports::{PreferenceError, PreferenceStore};

/// Last selected project.
pub const SELECTED_PROJECT_KEY: &str = "selectedProjectId";
/// Proxy template.
pub const PROXY_TEMPLATE_KEY: &str = "proxyTemplate";
/// Saved JSON comparisons.
pub const COMPARISONS_KEY: &str = "jsonComparisons";
/// Saved JWT samples.
pub const TOKENS_KEY: &str = "jwtTokens";

/// Key holding the last selected environment of a project.
#[must_use]
pub fn selected_environment_key(project_id: &str) -> String {
    format!("selectedEnv_{project_id}")
}

/// Preference accessors over a [`PreferenceStore`].
pub struct Preferences<P: PreferenceStore> {
    store: Arc<P>,
}

impl<P: PreferenceStore> Clone for Preferences<P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<P: PreferenceStore> Preferences<P> {
    /// Wraps a store.
    pub const fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    /// Last selected project id.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn selected_project(&self) -> Result<Option<String>, PreferenceError> {
        self.store.get(SELECTED_PROJECT_KEY).await
    }

    /// Remembers the selected project, or forgets it.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub async fn set_selected_project(&self, id: Option<&str>) -> Result<(), PreferenceError> {
        self.set_or_remove(SELECTED_PROJECT_KEY, id).await
    }

    /// Last selected environment of a project.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn selected_environment(
        &self,
        project_id: &str,
    ) -> Result<Option<String>, PreferenceError> {
        self.store.get(&selected_environment_key(project_id)).await
    }

    /// Remembers the selected environment of a project, or forgets it.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub async fn set_selected_environment(
        &self,
        project_id: &str,
        environment_id: Option<&str>,
    ) -> Result<(), PreferenceError> {
        self.set_or_remove(&selected_environment_key(project_id), environment_id)
            .await
    }

    /// Proxy template, if configured and non-empty.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn proxy_template(&self) -> Result<Option<String>, PreferenceError> {
        Ok(self
            .store
            .get(PROXY_TEMPLATE_KEY)
            .await?
            .filter(|t| !t.trim().is_empty()))
    }

    /// Stores the proxy template. An empty template clears it.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub async fn set_proxy_template(&self, template: &str) -> Result<(), PreferenceError> {
        let template = template.trim();
        self.set_or_remove(PROXY_TEMPLATE_KEY, Some(template).filter(|t| !t.is_empty()))
            .await
    }

    /// Saved comparisons in insertion order.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn comparisons(&self) -> Result<Vec<SavedComparison>, PreferenceError> {
        self.read_list(COMPARISONS_KEY).await
    }

    /// Appends a comparison.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn save_comparison(&self, saved: SavedComparison) -> Result<(), PreferenceError> {
        let mut list = self.comparisons().await?;
        list.push(saved);
        self.write_list(COMPARISONS_KEY, &list).await
    }

    /// Deletes a comparison. Returns false when it did not exist.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn delete_comparison(&self, id: &str) -> Result<bool, PreferenceError> {
        let mut list = self.comparisons().await?;
        let before = list.len();
        list.retain(|c| c.id != id);
        if list.len() == before {
            return Ok(false);
        }
        self.write_list(COMPARISONS_KEY, &list).await?;
        Ok(true)
    }

    /// Saved tokens in insertion order.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn tokens(&self) -> Result<Vec<SavedToken>, PreferenceError> {
        self.read_list(TOKENS_KEY).await
    }

    /// Appends a token.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn save_token(&self, saved: SavedToken) -> Result<(), PreferenceError> {
        let mut list = self.tokens().await?;
        list.push(saved);
        self.write_list(TOKENS_KEY, &list).await
    }

    /// Deletes a token. Returns false when it did not exist.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn delete_token(&self, id: &str) -> Result<bool, PreferenceError> {
        let mut list = self.tokens().await?;
        let before = list.len();
        list.retain(|t| t.id != id);
        if list.len() == before {
            return Ok(false);
        }
        self.write_list(TOKENS_KEY, &list).await?;
        Ok(true)
    }

    async fn set_or_remove(&self, key: &str, value: Option<&str>) -> Result<(), PreferenceError> {
        match value {
            Some(value) => self.store.set(key, value).await,
            None => self.store.remove(key).await,
        }
    }

    /// A corrupt list is logged and read as empty.
    async fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, PreferenceError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|error| {
            tracing::warn!(key, %error, "ignoring unreadable preference list");
            Vec::new()
        }))
    }

    async fn write_list<T: Serialize + Sync>(
        &self,
        key: &str,
        list: &[T],
    ) -> Result<(), PreferenceError> {
        let raw = serde_json::to_string(list)
            .map_err(|e| PreferenceError::Serialization(e.to_string()))?;
        self.store.set(key, &raw).await
    }
}
