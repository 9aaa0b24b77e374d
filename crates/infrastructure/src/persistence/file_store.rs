//! Workspace store backed by a single JSON document.
//!
//! The whole workspace lives in one `workspace.json`. Every write applies the
//! change to a copy of the loaded tables, persists the copy and only then
//! swaps it in, so a failed write leaves both disk and memory untouched.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use courier_application::ports::{StoreError, WorkspaceStore};
use courier_domain::{ApiRequest, Environment, Folder, PositionUpdate, Project};

use super::tables::WorkspaceTables;
use crate::serialization::{SerializationError, read_json_file, write_json_file};

/// File name of the workspace document inside the data directory.
pub const WORKSPACE_FILE: &str = "workspace.json";

/// File-based workspace store.
#[derive(Debug)]
pub struct FileWorkspaceStore {
    path: PathBuf,
    tables: Mutex<Option<WorkspaceTables>>,
}

fn to_store_error(error: SerializationError) -> StoreError {
    match error {
        SerializationError::Io(e) => StoreError::Io(e),
        other => StoreError::Serialization(other.to_string()),
    }
}

impl FileWorkspaceStore {
    /// Creates a store writing `workspace.json` inside `data_dir`.
    ///
    /// Nothing is read until the first operation.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self::at_path(data_dir.join(WORKSPACE_FILE))
    }

    /// Creates a store over an explicit document path.
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            tables: Mutex::new(None),
        }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read<R, F>(&self, view: F) -> Result<R, StoreError>
    where
        F: FnOnce(&WorkspaceTables) -> R + Send,
    {
        let mut guard = self.tables.lock().await;
        let tables = match guard.take() {
            Some(tables) => tables,
            None => {
                let loaded = read_json_file(&self.path).await.map_err(to_store_error)?;
                tracing::debug!(path = %self.path.display(), "loaded workspace document");
                loaded
            }
        };
        let result = view(&tables);
        *guard = Some(tables);
        Ok(result)
    }

    async fn write<F>(&self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut WorkspaceTables) -> Result<(), StoreError> + Send,
    {
        let mut guard = self.tables.lock().await;
        let mut next = match guard.as_ref() {
            Some(tables) => tables.clone(),
            None => read_json_file(&self.path).await.map_err(to_store_error)?,
        };
        change(&mut next)?;
        write_json_file(&self.path, &next)
            .await
            .map_err(to_store_error)?;
        *guard = Some(next);
        Ok(())
    }
}

#[async_trait]
impl WorkspaceStore for FileWorkspaceStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.read(|t| t.projects.clone()).await
    }

    async fn create_project(&self, project: &Project) -> Result<(), StoreError> {
        self.write(|t| t.create_project(project)).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        self.write(|t| {
            t.delete_project(id);
            Ok(())
        })
        .await
    }

    async fn list_folders(&self, project_id: &str) -> Result<Vec<Folder>, StoreError> {
        self.read(|t| t.folders_of(project_id)).await
    }

    async fn insert_folders(&self, folders: &[Folder]) -> Result<(), StoreError> {
        self.write(|t| {
            t.folders.extend_from_slice(folders);
            Ok(())
        })
        .await
    }

    async fn update_folder(&self, folder: &Folder) -> Result<(), StoreError> {
        self.write(|t| t.update_folder(folder)).await
    }

    async fn delete_folder(&self, id: &str) -> Result<(), StoreError> {
        self.write(|t| {
            t.delete_folder(id);
            Ok(())
        })
        .await
    }

    async fn list_requests(&self, folder_ids: &[String]) -> Result<Vec<ApiRequest>, StoreError> {
        self.read(|t| t.requests_of(folder_ids)).await
    }

    async fn insert_requests(&self, requests: &[ApiRequest]) -> Result<(), StoreError> {
        self.write(|t| {
            t.requests.extend_from_slice(requests);
            Ok(())
        })
        .await
    }

    async fn update_request(&self, request: &ApiRequest) -> Result<(), StoreError> {
        self.write(|t| t.update_request(request)).await
    }

    async fn delete_request(&self, id: &str) -> Result<(), StoreError> {
        self.write(|t| {
            t.delete_request(id);
            Ok(())
        })
        .await
    }

    async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), StoreError> {
        self.write(|t| t.update_positions(updates)).await
    }

    async fn list_environments(&self, project_id: &str) -> Result<Vec<Environment>, StoreError> {
        self.read(|t| t.environments_of(project_id)).await
    }

    async fn insert_environment(&self, environment: &Environment) -> Result<(), StoreError> {
        self.write(|t| {
            t.environments.push(environment.clone());
            Ok(())
        })
        .await
    }

    async fn update_environment(&self, environment: &Environment) -> Result<(), StoreError> {
        self.write(|t| t.update_environment(environment)).await
    }

    async fn delete_environment(&self, id: &str) -> Result<(), StoreError> {
        self.write(|t| {
            t.delete_environment(id);
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_empty_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkspaceStore::new(dir.path());
        assert!(store.list_projects().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::new("Shop", None).unwrap();
        let folder = Folder::new(&project.id, "Orders").unwrap();
        let request = ApiRequest::new(&folder.id, "List orders");

        {
            let store = FileWorkspaceStore::new(dir.path());
            store.create_project(&project).await.unwrap();
            store.insert_folders(&[folder.clone()]).await.unwrap();
            store.insert_requests(&[request.clone()]).await.unwrap();
        }

        let reopened = FileWorkspaceStore::new(dir.path());
        assert_eq!(reopened.list_projects().await.unwrap(), vec![project.clone()]);
        assert_eq!(reopened.list_folders(&project.id).await.unwrap(), vec![folder.clone()]);
        assert_eq!(
            reopened.list_requests(&[folder.id]).await.unwrap(),
            vec![request]
        );
    }

    #[tokio::test]
    async fn test_document_is_stable_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkspaceStore::new(dir.path());
        store
            .create_project(&Project::new("Shop", None).unwrap())
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(content.starts_with("{\n  \"projects\""));
        assert!(content.ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_failed_change_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkspaceStore::new(dir.path());
        let project = Project::new("Shop", None).unwrap();
        store.create_project(&project).await.unwrap();

        let missing = Folder::new(&project.id, "Ghost").unwrap();
        let result = store.update_folder(&missing).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));

        let reopened = FileWorkspaceStore::new(dir.path());
        assert!(reopened.list_folders(&project.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(WORKSPACE_FILE), "{oops")
            .await
            .unwrap();
        let store = FileWorkspaceStore::new(dir.path());
        assert!(matches!(
            store.list_projects().await,
            Err(StoreError::Serialization(_))
        ));
    }
}
