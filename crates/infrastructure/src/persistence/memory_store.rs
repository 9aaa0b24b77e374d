//! Workspace store kept entirely in memory.

use async_trait::async_trait;
use parking_lot::Mutex;

use courier_application::ports::{StoreError, WorkspaceStore};
use courier_domain::{ApiRequest, Environment, Folder, PositionUpdate, Project};

use super::tables::WorkspaceTables;

/// In-memory workspace store, used for scratch sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryWorkspaceStore {
    tables: Mutex<WorkspaceTables>,
}

impl MemoryWorkspaceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `tables`.
    #[must_use]
    pub fn with_tables(tables: WorkspaceTables) -> Self {
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Returns a copy of everything stored.
    #[must_use]
    pub fn snapshot(&self) -> WorkspaceTables {
        self.tables.lock().clone()
    }
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.tables.lock().projects.clone())
    }

    async fn create_project(&self, project: &Project) -> Result<(), StoreError> {
        self.tables.lock().create_project(project)
    }

    async fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        self.tables.lock().delete_project(id);
        Ok(())
    }

    async fn list_folders(&self, project_id: &str) -> Result<Vec<Folder>, StoreError> {
        Ok(self.tables.lock().folders_of(project_id))
    }

    async fn insert_folders(&self, folders: &[Folder]) -> Result<(), StoreError> {
        self.tables.lock().folders.extend_from_slice(folders);
        Ok(())
    }

    async fn update_folder(&self, folder: &Folder) -> Result<(), StoreError> {
        self.tables.lock().update_folder(folder)
    }

    async fn delete_folder(&self, id: &str) -> Result<(), StoreError> {
        self.tables.lock().delete_folder(id);
        Ok(())
    }

    async fn list_requests(&self, folder_ids: &[String]) -> Result<Vec<ApiRequest>, StoreError> {
        Ok(self.tables.lock().requests_of(folder_ids))
    }

    async fn insert_requests(&self, requests: &[ApiRequest]) -> Result<(), StoreError> {
        self.tables.lock().requests.extend_from_slice(requests);
        Ok(())
    }

    async fn update_request(&self, request: &ApiRequest) -> Result<(), StoreError> {
        self.tables.lock().update_request(request)
    }

    async fn delete_request(&self, id: &str) -> Result<(), StoreError> {
        self.tables.lock().delete_request(id);
        Ok(())
    }

    async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), StoreError> {
        self.tables.lock().update_positions(updates)
    }

    async fn list_environments(&self, project_id: &str) -> Result<Vec<Environment>, StoreError> {
        Ok(self.tables.lock().environments_of(project_id))
    }

    async fn insert_environment(&self, environment: &Environment) -> Result<(), StoreError> {
        self.tables.lock().environments.push(environment.clone());
        Ok(())
    }

    async fn update_environment(&self, environment: &Environment) -> Result<(), StoreError> {
        self.tables.lock().update_environment(environment)
    }

    async fn delete_environment(&self, id: &str) -> Result<(), StoreError> {
        self.tables.lock().delete_environment(id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_delete_folder_drops_its_requests() {
        let store = MemoryWorkspaceStore::new();
        let project = Project::new("Shop", None).unwrap();
        let keep = Folder::new(&project.id, "Keep").unwrap();
        let drop = Folder::new(&project.id, "Drop").unwrap();
        store.create_project(&project).await.unwrap();
        store
            .insert_folders(&[keep.clone(), drop.clone()])
            .await
            .unwrap();
        store
            .insert_requests(&[
                ApiRequest::new(&keep.id, "Stays"),
                ApiRequest::new(&drop.id, "Goes"),
            ])
            .await
            .unwrap();

        store.delete_folder(&drop.id).await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.folders, vec![keep]);
        assert_eq!(snapshot.requests.len(), 1);
        assert_eq!(snapshot.requests[0].name, "Stays");
    }

    #[tokio::test]
    async fn test_update_positions_moves_between_folders() {
        let store = MemoryWorkspaceStore::new();
        let a = Folder::new("p", "A").unwrap();
        let b = Folder::new("p", "B").unwrap();
        let request = ApiRequest::new(&a.id, "Ping");
        store.insert_folders(&[a.clone(), b.clone()]).await.unwrap();
        store.insert_requests(&[request.clone()]).await.unwrap();

        store
            .update_positions(&[PositionUpdate {
                id: request.id.clone(),
                folder_id: b.id.clone(),
                position: 0,
            }])
            .await
            .unwrap();

        assert!(store.list_requests(&[a.id]).await.unwrap().is_empty());
        assert_eq!(store.list_requests(&[b.id]).await.unwrap().len(), 1);
    }
}
