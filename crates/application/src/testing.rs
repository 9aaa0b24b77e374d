//! In-memory ports shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use courier_domain::{ApiRequest, Environment, Folder, PositionUpdate, Project};

use crate::ports::{PreferenceError, PreferenceStore, StoreError, WorkspaceStore};

#[derive(Default)]
pub struct MemoryPreferences {
    pub values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
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

#[derive(Default)]
pub struct Tables {
    pub projects: Vec<Project>,
    pub folders: Vec<Folder>,
    pub requests: Vec<ApiRequest>,
    pub environments: Vec<Environment>,
}

/// Store whose batch position writes can be made to fail.
#[derive(Default)]
pub struct MemoryStore {
    pub tables: Mutex<Tables>,
    pub fail_positions: AtomicBool,
}

impl MemoryStore {
    pub fn fail_position_writes(&self) {
        self.fail_positions.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl WorkspaceStore for MemoryStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.tables.lock().projects.clone())
    }

    async fn create_project(&self, project: &Project) -> Result<(), StoreError> {
        self.tables.lock().projects.push(project.clone());
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        let mut t = self.tables.lock();
        let folder_ids: Vec<String> = t
            .folders
            .iter()
            .filter(|f| f.project_id == id)
            .map(|f| f.id.clone())
            .collect();
        t.projects.retain(|p| p.id != id);
        t.folders.retain(|f| f.project_id != id);
        t.requests.retain(|r| !folder_ids.contains(&r.folder_id));
        t.environments.retain(|e| e.project_id != id);
        Ok(())
    }

    async fn list_folders(&self, project_id: &str) -> Result<Vec<Folder>, StoreError> {
        Ok(self
            .tables
            .lock()
            .folders
            .iter()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_folders(&self, folders: &[Folder]) -> Result<(), StoreError> {
        self.tables.lock().folders.extend_from_slice(folders);
        Ok(())
    }

    async fn update_folder(&self, folder: &Folder) -> Result<(), StoreError> {
        let mut t = self.tables.lock();
        let slot = t
            .folders
            .iter_mut()
            .find(|f| f.id == folder.id)
            .ok_or_else(|| StoreError::NotFound(folder.id.clone()))?;
        *slot = folder.clone();
        Ok(())
    }

    async fn delete_folder(&self, id: &str) -> Result<(), StoreError> {
        let mut t = self.tables.lock();
        t.folders.retain(|f| f.id != id);
        t.requests.retain(|r| r.folder_id != id);
        Ok(())
    }

    async fn list_requests(&self, folder_ids: &[String]) -> Result<Vec<ApiRequest>, StoreError> {
        let mut list: Vec<ApiRequest> = self
            .tables
            .lock()
            .requests
            .iter()
            .filter(|r| folder_ids.contains(&r.folder_id))
            .cloned()
            .collect();
        list.sort_by_key(|r| r.position);
        Ok(list)
    }

    async fn insert_requests(&self, requests: &[ApiRequest]) -> Result<(), StoreError> {
        self.tables.lock().requests.extend_from_slice(requests);
        Ok(())
    }

    async fn update_request(&self, request: &ApiRequest) -> Result<(), StoreError> {
        let mut t = self.tables.lock();
        let slot = t
            .requests
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| StoreError::NotFound(request.id.clone()))?;
        *slot = request.clone();
        Ok(())
    }

    async fn delete_request(&self, id: &str) -> Result<(), StoreError> {
        self.tables.lock().requests.retain(|r| r.id != id);
        Ok(())
    }

    async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), StoreError> {
        if self.fail_positions.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("positions rejected".to_string()));
        }
        let mut t = self.tables.lock();
        for update in updates {
            if let Some(r) = t.requests.iter_mut().find(|r| r.id == update.id) {
                r.folder_id.clone_from(&update.folder_id);
                r.position = update.position;
            }
        }
        Ok(())
    }

    async fn list_environments(&self, project_id: &str) -> Result<Vec<Environment>, StoreError> {
        let mut list: Vec<Environment> = self
            .tables
            .lock()
            .environments
            .iter()
            .filter(|e| e.project_id == project_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn insert_environment(&self, environment: &Environment) -> Result<(), StoreError> {
        self.tables.lock().environments.push(environment.clone());
        Ok(())
    }

    async fn update_environment(&self, environment: &Environment) -> Result<(), StoreError> {
        let mut t = self.tables.lock();
        let slot = t
            .environments
            .iter_mut()
            .find(|e| e.id == environment.id)
            .ok_or_else(|| StoreError::NotFound(environment.id.clone()))?;
        *slot = environment.clone();
        Ok(())
    }

    async fn delete_environment(&self, id: &str) -> Result<(), StoreError> {
        self.tables.lock().environments.retain(|e| e.id != id);
        Ok(())
    }
}
