//! Client session: the in-memory view of the selected project.
//!
//! The session owns the lists a client displays (projects, folders,
//! requests, environments) and keeps them in step with the backing store.
//! Every mutation writes through the store and then updates the lists from
//! the latest known state.

mod environments;
mod folders;
mod requests;
mod runs;

pub use runs::RunOutcome;

use std::sync::Arc;

use courier_domain::reorder::sort_by_position;
use courier_domain::{ApiRequest, Environment, Folder, Project};

use crate::error::{ApplicationError, ApplicationResult};
use crate::executor::RunSlot;
use crate::ports::{PreferenceStore, WorkspaceStore};
use crate::preferences::Preferences;

/// In-memory state of one client.
pub struct Session<S: WorkspaceStore, P: PreferenceStore> {
    store: Arc<S>,
    preferences: Preferences<P>,
    projects: Vec<Project>,
    selected_project: Option<String>,
    folders: Vec<Folder>,
    requests: Vec<ApiRequest>,
    environments: Vec<Environment>,
    active_environment: Option<String>,
    run_slot: RunSlot,
    compare_slots: [RunSlot; 2],
}

impl<S: WorkspaceStore, P: PreferenceStore> Session<S, P> {
    /// Creates an empty session. Call [`Session::load`] to populate it.
    pub fn new(store: Arc<S>, preferences: Arc<P>) -> Self {
        Self {
            store,
            preferences: Preferences::new(preferences),
            projects: Vec::new(),
            selected_project: None,
            folders: Vec::new(),
            requests: Vec::new(),
            environments: Vec::new(),
            active_environment: None,
            run_slot: RunSlot::new(),
            compare_slots: [RunSlot::new(), RunSlot::new()],
        }
    }

    /// Loads the project list and restores the last selected project,
    /// falling back to the first one.
    ///
    /// # Errors
    /// Returns an error if the store or preferences cannot be read.
    pub async fn load(&mut self) -> ApplicationResult<()> {
        self.projects = self.store.list_projects().await?;
        let remembered = self.preferences.selected_project().await?;
        let selected = remembered
            .filter(|id| self.projects.iter().any(|p| &p.id == id))
            .or_else(|| self.projects.first().map(|p| p.id.clone()));
        self.selected_project = selected;
        self.refresh_project_data().await
    }

    /// Reloads folders, requests and environments of the selected project.
    ///
    /// The active environment is restored from preferences when it still
    /// exists.
    ///
    /// # Errors
    /// Returns an error if the store or preferences cannot be read.
    pub async fn refresh_project_data(&mut self) -> ApplicationResult<()> {
        let Some(project_id) = self.selected_project.clone() else {
            self.folders.clear();
            self.requests.clear();
            self.environments.clear();
            self.active_environment = None;
            return Ok(());
        };

        self.folders = self.store.list_folders(&project_id).await?;
        let folder_ids: Vec<String> = self.folders.iter().map(|f| f.id.clone()).collect();
        self.requests = if folder_ids.is_empty() {
            Vec::new()
        } else {
            self.store.list_requests(&folder_ids).await?
        };
        sort_by_position(&mut self.requests);
        self.environments = self.store.list_environments(&project_id).await?;

        let remembered = self.preferences.selected_environment(&project_id).await?;
        self.active_environment =
            remembered.filter(|id| self.environments.iter().any(|e| &e.id == id));
        Ok(())
    }

    /// Selects a project and loads its data.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown project, or a store error.
    pub async fn select_project(&mut self, project_id: &str) -> ApplicationResult<()> {
        if !self.projects.iter().any(|p| p.id == project_id) {
            return Err(ApplicationError::NotFound(format!("project {project_id}")));
        }
        self.selected_project = Some(project_id.to_string());
        self.preferences.set_selected_project(Some(project_id)).await?;
        self.refresh_project_data().await
    }

    /// Creates a project and selects it.
    ///
    /// # Errors
    /// Returns an error for a blank name or a store failure.
    pub async fn create_project(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> ApplicationResult<Project> {
        let project = Project::new(name, description)?;
        self.store.create_project(&project).await?;
        self.projects.push(project.clone());
        self.select_project(&project.id).await?;
        Ok(project)
    }

    /// Deletes a project. When it was selected, the first remaining project
    /// becomes selected.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown project, or a store error.
    pub async fn delete_project(&mut self, project_id: &str) -> ApplicationResult<()> {
        if !self.projects.iter().any(|p| p.id == project_id) {
            return Err(ApplicationError::NotFound(format!("project {project_id}")));
        }
        self.store.delete_project(project_id).await?;
        self.projects.retain(|p| p.id != project_id);
        self.preferences
            .set_selected_environment(project_id, None)
            .await?;

        if self.selected_project.as_deref() == Some(project_id) {
            match self.projects.first().map(|p| p.id.clone()) {
                Some(next) => self.select_project(&next).await?,
                None => {
                    self.selected_project = None;
                    self.preferences.set_selected_project(None).await?;
                    self.refresh_project_data().await?;
                }
            }
        }
        Ok(())
    }

    /// All projects.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The selected project.
    #[must_use]
    pub fn selected_project(&self) -> Option<&Project> {
        let id = self.selected_project.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }

    /// Folders of the selected project in creation order.
    #[must_use]
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Requests of the selected project.
    #[must_use]
    pub fn requests(&self) -> &[ApiRequest] {
        &self.requests
    }

    /// Environments of the selected project ordered by name.
    #[must_use]
    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    /// The active environment, if any.
    #[must_use]
    pub fn active_environment(&self) -> Option<&Environment> {
        let id = self.active_environment.as_deref()?;
        self.environments.iter().find(|e| e.id == id)
    }

    /// Preference accessors.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences<P> {
        &self.preferences
    }

    fn require_project(&self) -> ApplicationResult<String> {
        self.selected_project
            .clone()
            .ok_or(ApplicationError::NoProjectSelected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::testing::{MemoryPreferences, MemoryStore};
    use pretty_assertions::assert_eq;

    pub(crate) type TestSession = Session<MemoryStore, MemoryPreferences>;

    pub(crate) fn session() -> (TestSession, Arc<MemoryStore>, Arc<MemoryPreferences>) {
        let store = Arc::new(MemoryStore::default());
        let prefs = Arc::new(MemoryPreferences::default());
        (
            Session::new(Arc::clone(&store), Arc::clone(&prefs)),
            store,
            prefs,
        )
    }

    /// Session with one selected project and a folder named "Main".
    pub(crate) async fn with_folder() -> (TestSession, Arc<MemoryStore>, String) {
        let (mut session, store, _) = session();
        session.create_project("Demo", None).await.unwrap();
        let folder = session.create_folder("Main").await.unwrap();
        (session, store, folder.id)
    }

    #[tokio::test]
    async fn test_load_falls_back_to_first_project() {
        let (mut session, store, _) = session();
        let first = Project::new("First", None).unwrap();
        store.tables.lock().projects.push(first.clone());
        store
            .tables
            .lock()
            .projects
            .push(Project::new("Second", None).unwrap());

        session.load().await.unwrap();
        assert_eq!(session.selected_project().map(|p| p.id.clone()), Some(first.id));
    }

    #[tokio::test]
    async fn test_load_restores_remembered_project() {
        let (mut session, store, prefs) = session();
        let second = Project::new("Second", None).unwrap();
        store
            .tables
            .lock()
            .projects
            .extend([Project::new("First", None).unwrap(), second.clone()]);
        prefs
            .values
            .lock()
            .insert("selectedProjectId".to_string(), second.id.clone());

        session.load().await.unwrap();
        assert_eq!(session.selected_project().unwrap().name, "Second");
    }

    #[tokio::test]
    async fn test_delete_selected_project_selects_next() {
        let (mut session, _, prefs) = session();
        let a = session.create_project("A", None).await.unwrap();
        let b = session.create_project("B", None).await.unwrap();
        assert_eq!(session.selected_project().unwrap().id, b.id);

        session.delete_project(&b.id).await.unwrap();
        assert_eq!(session.selected_project().unwrap().id, a.id);
        assert_eq!(
            prefs.values.lock().get("selectedProjectId").cloned(),
            Some(a.id.clone())
        );

        session.delete_project(&a.id).await.unwrap();
        assert!(session.selected_project().is_none());
        assert!(!prefs.values.lock().contains_key("selectedProjectId"));
    }

    #[tokio::test]
    async fn test_select_unknown_project() {
        let (mut session, _, _) = session();
        assert!(matches!(
            session.select_project("nope").await,
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh_orders_requests_by_position() {
        let (mut session, store, folder_id) = with_folder().await;
        {
            let mut tables = store.tables.lock();
            tables.requests.push(ApiRequest::new(&folder_id, "b").with_position(1));
            tables.requests.push(ApiRequest::new(&folder_id, "a").with_position(0));
        }
        session.refresh_project_data().await.unwrap();
        let names: Vec<&str> = session.requests().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
