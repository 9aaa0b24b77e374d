//! Import collection use case.

use std::collections::HashMap;
use std::sync::Arc;

use courier_domain::{ApiRequest, Folder, ImportPlan, ImportSummary};

use crate::error::ApplicationResult;
use crate::ports::WorkspaceStore;

/// Input for importing a parsed collection.
#[derive(Debug, Clone)]
pub struct ImportCollectionInput {
    /// Project receiving the folders.
    pub project_id: String,
    /// Parsed collection.
    pub plan: ImportPlan,
}

/// Use case for storing a parsed collection in a project.
///
/// Folders are created first; requests are then attached to them by name.
/// A request whose folder name has no stored folder is skipped with a
/// warning instead of failing the import.
pub struct ImportCollection<S: WorkspaceStore> {
    store: Arc<S>,
}

impl<S: WorkspaceStore> ImportCollection<S> {
    /// Creates a new `ImportCollection` use case.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Stores folders, then requests.
    ///
    /// # Errors
    /// Returns an error if the store rejects the folders or the requests.
    pub async fn execute(&self, input: ImportCollectionInput) -> ApplicationResult<ImportSummary> {
        let ImportCollectionInput { project_id, plan } = input;

        let mut folders = Vec::with_capacity(plan.folders.len());
        for name in &plan.folders {
            folders.push(Folder::new(&project_id, name.as_str())?);
        }
        self.store.insert_folders(&folders).await?;

        let by_name: HashMap<&str, &str> = folders
            .iter()
            .map(|f| (f.name.as_str(), f.id.as_str()))
            .collect();

        let mut requests: Vec<ApiRequest> = Vec::with_capacity(plan.requests.len());
        let mut skipped = 0;
        for planned in plan.requests {
            if let Some(folder_id) = by_name.get(planned.folder_name.as_str()) {
                requests.push(planned.into_request(folder_id));
            } else {
                tracing::warn!(
                    request = %planned.name,
                    folder = %planned.folder_name,
                    "skipping imported request without a folder"
                );
                skipped += 1;
            }
        }

        if !requests.is_empty() {
            self.store.insert_requests(&requests).await?;
        }

        Ok(ImportSummary {
            folders: folders.len(),
            requests: requests.len(),
            skipped,
        })
    }
}
