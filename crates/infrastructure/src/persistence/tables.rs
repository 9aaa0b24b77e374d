//! The persisted workspace document and the record operations over it.

use serde::{Deserialize, Serialize};

use courier_application::ports::StoreError;
use courier_domain::environment::sort_by_name;
use courier_domain::reorder::sort_by_position;
use courier_domain::{ApiRequest, Environment, Folder, PositionUpdate, Project};

/// Every record of a workspace.
///
/// Folders keep insertion order, which is their creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceTables {
    /// Projects
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Folders of all projects
    #[serde(default)]
    pub folders: Vec<Folder>,
    /// Requests of all folders
    #[serde(default)]
    pub requests: Vec<ApiRequest>,
    /// Environments of all projects
    #[serde(default)]
    pub environments: Vec<Environment>,
}

fn not_found(kind: &str, id: &str) -> StoreError {
    StoreError::NotFound(format!("{kind} {id}"))
}

impl WorkspaceTables {
    pub(crate) fn create_project(&mut self, project: &Project) -> Result<(), StoreError> {
        if self.projects.iter().any(|p| p.id == project.id) {
            return Err(StoreError::Unavailable(format!(
                "project {} already exists",
                project.id
            )));
        }
        self.projects.push(project.clone());
        Ok(())
    }

    pub(crate) fn delete_project(&mut self, id: &str) {
        let folder_ids: Vec<String> = self
            .folders
            .iter()
            .filter(|f| f.project_id == id)
            .map(|f| f.id.clone())
            .collect();
        self.projects.retain(|p| p.id != id);
        self.folders.retain(|f| f.project_id != id);
        self.requests.retain(|r| !folder_ids.contains(&r.folder_id));
        self.environments.retain(|e| e.project_id != id);
    }

    pub(crate) fn folders_of(&self, project_id: &str) -> Vec<Folder> {
        self.folders
            .iter()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect()
    }

    pub(crate) fn update_folder(&mut self, folder: &Folder) -> Result<(), StoreError> {
        let slot = self
            .folders
            .iter_mut()
            .find(|f| f.id == folder.id)
            .ok_or_else(|| not_found("folder", &folder.id))?;
        slot.clone_from(folder);
        Ok(())
    }

    pub(crate) fn delete_folder(&mut self, id: &str) {
        self.folders.retain(|f| f.id != id);
        self.requests.retain(|r| r.folder_id != id);
    }

    pub(crate) fn requests_of(&self, folder_ids: &[String]) -> Vec<ApiRequest> {
        let mut requests: Vec<ApiRequest> = self
            .requests
            .iter()
            .filter(|r| folder_ids.contains(&r.folder_id))
            .cloned()
            .collect();
        sort_by_position(&mut requests);
        requests
    }

    pub(crate) fn update_request(&mut self, request: &ApiRequest) -> Result<(), StoreError> {
        let slot = self
            .requests
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| not_found("request", &request.id))?;
        slot.clone_from(request);
        Ok(())
    }

    pub(crate) fn delete_request(&mut self, id: &str) {
        self.requests.retain(|r| r.id != id);
    }

    /// Applies every update or, when one names an unknown request, none.
    pub(crate) fn update_positions(&mut self, updates: &[PositionUpdate]) -> Result<(), StoreError> {
        if let Some(missing) = updates
            .iter()
            .find(|u| !self.requests.iter().any(|r| r.id == u.id))
        {
            return Err(not_found("request", &missing.id));
        }
        for update in updates {
            if let Some(request) = self.requests.iter_mut().find(|r| r.id == update.id) {
                request.folder_id.clone_from(&update.folder_id);
                request.position = update.position;
            }
        }
        Ok(())
    }

    pub(crate) fn environments_of(&self, project_id: &str) -> Vec<Environment> {
        let mut environments: Vec<Environment> = self
            .environments
            .iter()
            .filter(|e| e.project_id == project_id)
            .cloned()
            .collect();
        sort_by_name(&mut environments);
        environments
    }

    pub(crate) fn update_environment(&mut self, environment: &Environment) -> Result<(), StoreError> {
        let slot = self
            .environments
            .iter_mut()
            .find(|e| e.id == environment.id)
            .ok_or_else(|| not_found("environment", &environment.id))?;
        slot.clone_from(environment);
        Ok(())
    }

    pub(crate) fn delete_environment(&mut self, id: &str) {
        self.environments.retain(|e| e.id != id);
    }
}
