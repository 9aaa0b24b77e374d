//! Backing store port
//!
//! Persistence of projects, folders, requests and environments.

use async_trait::async_trait;

use courier_domain::{ApiRequest, Environment, Folder, PositionUpdate, Project};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store refused or failed the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Repository trait for everything a workspace persists.
///
/// Listing order is part of the contract: folders in creation order, requests
/// by position, environments by name.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Lists every project.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Creates a project atomically.
    async fn create_project(&self, project: &Project) -> Result<(), StoreError>;

    /// Deletes a project together with its folders, requests and environments.
    async fn delete_project(&self, id: &str) -> Result<(), StoreError>;

    /// Lists the folders of a project in creation order.
    async fn list_folders(&self, project_id: &str) -> Result<Vec<Folder>, StoreError>;

    /// Inserts folders.
    async fn insert_folders(&self, folders: &[Folder]) -> Result<(), StoreError>;

    /// Updates a folder.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if the folder doesn't exist.
    async fn update_folder(&self, folder: &Folder) -> Result<(), StoreError>;

    /// Deletes a folder and its requests.
    async fn delete_folder(&self, id: &str) -> Result<(), StoreError>;

    /// Lists the requests of the given folders ordered by position.
    async fn list_requests(&self, folder_ids: &[String]) -> Result<Vec<ApiRequest>, StoreError>;

    /// Inserts requests.
    async fn insert_requests(&self, requests: &[ApiRequest]) -> Result<(), StoreError>;

    /// Updates a request.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if the request doesn't exist.
    async fn update_request(&self, request: &ApiRequest) -> Result<(), StoreError>;

    /// Deletes a request.
    async fn delete_request(&self, id: &str) -> Result<(), StoreError>;

    /// Writes folder and position of several requests in one batch.
    ///
    /// Either every update is applied or none is.
    async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), StoreError>;

    /// Lists the environments of a project ordered by name.
    async fn list_environments(&self, project_id: &str) -> Result<Vec<Environment>, StoreError>;

    /// Inserts an environment.
    async fn insert_environment(&self, environment: &Environment) -> Result<(), StoreError>;

    /// Updates an environment.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if the environment doesn't exist.
    async fn update_environment(&self, environment: &Environment) -> Result<(), StoreError>;

    /// Deletes an environment.
    async fn delete_environment(&self, id: &str) -> Result<(), StoreError>;
}
