//! Preference stores: a JSON file on disk and an in-memory map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

use courier_application::ports::{PreferenceError, PreferenceStore};

use crate::serialization::{SerializationError, read_json_file, write_json_file};

/// File name of the preference document inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

fn to_preference_error(error: SerializationError) -> PreferenceError {
    match error {
        SerializationError::Io(e) => PreferenceError::Io(e),
        other => PreferenceError::Serialization(other.to_string()),
    }
}

/// Preferences persisted as one flat JSON object of strings.
///
/// The file is re-read on every call so that several processes sharing a
/// data directory observe each other's writes.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FilePreferenceStore {
    /// Creates a store writing `preferences.json` inside `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PREFERENCES_FILE),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        read_json_file(&self.path).await.map_err(to_preference_error)
    }

    async fn store(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        write_json_file(&self.path, values)
            .await
            .map_err(to_preference_error)
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values).await
    }

    async fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        if values.remove(key).is_some() {
            self.store(&values).await?;
        }
        Ok(())
    }
}

/// Preferences held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.values.lock().remove(key);
        Ok(())
    }
}
