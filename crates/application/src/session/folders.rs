//! Folder operations and collection import.

use std::sync::Arc;

use courier_domain::{Folder, ImportPlan, ImportSummary};

use super::Session;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{PreferenceStore, WorkspaceStore};
use crate::use_cases::{ImportCollection, ImportCollectionInput};

impl<S: WorkspaceStore, P: PreferenceStore> Session<S, P> {
    /// Creates a folder in the selected project.
    ///
    /// # Errors
    /// Returns an error without a selected project, for a blank name, or
    /// on a store failure.
    pub async fn create_folder(&mut self, name: &str) -> ApplicationResult<Folder> {
        let project_id = self.require_project()?;
        let folder = Folder::new(project_id, name.trim())?;
        self.store
            .insert_folders(std::slice::from_ref(&folder))
            .await?;
        self.folders.push(folder.clone());
        Ok(folder)
    }

    /// Renames a folder.
    ///
    /// # Errors
    /// Returns `NotFound`, a validation error, or a store error.
    pub async fn rename_folder(&mut self, folder_id: &str, name: &str) -> ApplicationResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::Validation(
                "folder name must not be empty".to_string(),
            ));
        }
        let mut folder = self.folder(folder_id)?.clone();
        folder.name = name.to_string();
        self.store.update_folder(&folder).await?;
        if let Some(slot) = self.folders.iter_mut().find(|f| f.id == folder_id) {
            *slot = folder;
        }
        Ok(())
    }

    /// Deletes a folder and every request in it.
    ///
    /// # Errors
    /// Returns `NotFound` or a store error.
    pub async fn delete_folder(&mut self, folder_id: &str) -> ApplicationResult<()> {
        self.folder(folder_id)?;
        self.store.delete_folder(folder_id).await?;
        self.folders.retain(|f| f.id != folder_id);
        self.requests.retain(|r| r.folder_id != folder_id);
        Ok(())
    }

    /// Looks up a folder of the selected project.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown folder.
    pub fn folder(&self, folder_id: &str) -> ApplicationResult<&Folder> {
        self.folders
            .iter()
            .find(|f| f.id == folder_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("folder {folder_id}")))
    }

    /// Looks up a folder by its name.
    #[must_use]
    pub fn folder_by_name(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.name == name)
    }

    /// Stores a parsed collection in the selected project and reloads.
    ///
    /// # Errors
    /// Returns an error without a selected project or on a store failure.
    pub async fn import(&mut self, plan: ImportPlan) -> ApplicationResult<ImportSummary> {
        let project_id = self.require_project()?;
        let summary = ImportCollection::new(Arc::clone(&self.store))
            .execute(ImportCollectionInput { project_id, plan })
            .await?;
        self.refresh_project_data().await?;
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::session::tests::{session, with_folder};
    use courier_domain::{ApiRequest, BodyType, HeaderMap, HttpMethod, ImportPlan, PlannedRequest};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_folder_requires_project() {
        let (mut session, _, _) = session();
        assert!(session.create_folder("Auth").await.is_err());
    }

    #[tokio::test]
    async fn test_rename_and_delete_folder() {
        let (mut session, store, folder_id) = with_folder().await;
        session.rename_folder(&folder_id, " Renamed ").await.unwrap();
        assert_eq!(session.folder(&folder_id).unwrap().name, "Renamed");
        assert!(session.rename_folder(&folder_id, "").await.is_err());

        store
            .tables
            .lock()
            .requests
            .push(ApiRequest::new(&folder_id, "Ping"));
        session.refresh_project_data().await.unwrap();
        assert_eq!(session.requests().len(), 1);

        session.delete_folder(&folder_id).await.unwrap();
        assert!(session.folders().is_empty());
        assert!(session.requests().is_empty());
        assert!(store.tables.lock().requests.is_empty());
    }

    #[tokio::test]
    async fn test_import_reloads_session() {
        let (mut session, _, _) = session();
        session.create_project("Imported", None).await.unwrap();
        let plan = ImportPlan {
            collection_name: "Shop".to_string(),
            folders: vec!["Shop".to_string()],
            requests: vec![PlannedRequest {
                folder_name: "Shop".to_string(),
                name: "Health".to_string(),
                method: HttpMethod::Get,
                url: "https://shop.test/health".to_string(),
                headers: HeaderMap::new(),
                body_type: BodyType::None,
                body: String::new(),
                position: 0,
            }],
        };

        let summary = session.import(plan).await.unwrap();
        assert_eq!(
            summary.to_string(),
            "Successfully imported 1 folders and 1 requests."
        );
        assert_eq!(session.folders()[0].name, "Shop");
        assert_eq!(session.requests()[0].folder_id, session.folders()[0].id);
    }
}
