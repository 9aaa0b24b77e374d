//! Environment management and selection.

use courier_domain::Environment;
use courier_domain::environment::sort_by_name;

use super::Session;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{PreferenceStore, WorkspaceStore};

impl<S: WorkspaceStore, P: PreferenceStore> Session<S, P> {
    /// Looks up an environment of the selected project.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown environment.
    pub fn environment(&self, environment_id: &str) -> ApplicationResult<&Environment> {
        self.environments
            .iter()
            .find(|e| e.id == environment_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("environment {environment_id}")))
    }

    /// Looks up an environment by name.
    #[must_use]
    pub fn environment_by_name(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.name == name)
    }

    /// Creates an empty environment in the selected project.
    ///
    /// # Errors
    /// Returns an error without a selected project, for a blank name, or
    /// on a store failure.
    pub async fn create_environment(&mut self, name: &str) -> ApplicationResult<Environment> {
        let project_id = self.require_project()?;
        let environment = Environment::new(project_id, name.trim())?;
        self.store.insert_environment(&environment).await?;
        self.environments.push(environment.clone());
        sort_by_name(&mut self.environments);
        Ok(environment)
    }

    /// Renames an environment.
    ///
    /// # Errors
    /// Returns `NotFound`, a validation error, or a store error.
    pub async fn rename_environment(
        &mut self,
        environment_id: &str,
        name: &str,
    ) -> ApplicationResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::Validation(
                "environment name must not be empty".to_string(),
            ));
        }
        let mut environment = self.environment(environment_id)?.clone();
        environment.name = name.to_string();
        self.commit_environment(environment).await
    }

    /// Sets one variable.
    ///
    /// # Errors
    /// Returns `NotFound`, a validation error for an empty key, or a store
    /// error.
    pub async fn set_variable(
        &mut self,
        environment_id: &str,
        key: &str,
        value: &str,
    ) -> ApplicationResult<()> {
        if key.is_empty() {
            return Err(ApplicationError::Validation(
                "variable name must not be empty".to_string(),
            ));
        }
        let mut environment = self.environment(environment_id)?.clone();
        environment
            .variables
            .insert(key.to_string(), value.to_string());
        self.commit_environment(environment).await
    }

    /// Removes one variable. Returns false when it was not set.
    ///
    /// # Errors
    /// Returns `NotFound` or a store error.
    pub async fn remove_variable(
        &mut self,
        environment_id: &str,
        key: &str,
    ) -> ApplicationResult<bool> {
        let mut environment = self.environment(environment_id)?.clone();
        if environment.variables.remove(key).is_none() {
            return Ok(false);
        }
        self.commit_environment(environment).await?;
        Ok(true)
    }

    /// Deletes an environment, deactivating it when it was active.
    ///
    /// # Errors
    /// Returns `NotFound` or a store error.
    pub async fn delete_environment(&mut self, environment_id: &str) -> ApplicationResult<()> {
        self.environment(environment_id)?;
        self.store.delete_environment(environment_id).await?;
        self.environments.retain(|e| e.id != environment_id);
        if self.active_environment.as_deref() == Some(environment_id) {
            self.select_environment(None).await?;
        }
        Ok(())
    }

    /// Activates an environment, or none, and remembers the choice for the
    /// selected project.
    ///
    /// # Errors
    /// Returns an error without a selected project, `NotFound` for an
    /// unknown environment, or a preference error.
    pub async fn select_environment(
        &mut self,
        environment_id: Option<&str>,
    ) -> ApplicationResult<()> {
        let project_id = self.require_project()?;
        if let Some(id) = environment_id {
            self.environment(id)?;
        }
        self.active_environment = environment_id.map(str::to_string);
        self.preferences
            .set_selected_environment(&project_id, environment_id)
            .await?;
        Ok(())
    }

    /// Writes an environment and replaces it in the session lists, so later
    /// runs see the new values.
    ///
    /// # Errors
    /// Returns the store error; the session is left unchanged in that case.
    pub async fn commit_environment(&mut self, environment: Environment) -> ApplicationResult<()> {
        self.store.update_environment(&environment).await?;
        self.replace_environment(environment);
        Ok(())
    }

    pub(super) fn replace_environment(&mut self, environment: Environment) {
        if let Some(slot) = self.environments.iter_mut().find(|e| e.id == environment.id) {
            *slot = environment;
        }
        sort_by_name(&mut self.environments);
    }
}
