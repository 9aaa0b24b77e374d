//! Request operations: create, save, duplicate, delete and reorder.

use courier_domain::reorder::{self, DropTarget, PositionUpdate};
use courier_domain::{ApiRequest, AuthDetails};

use super::Session;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{PreferenceStore, WorkspaceStore};

/// Name given to freshly created requests.
pub const NEW_REQUEST_NAME: &str = "New Request";

impl<S: WorkspaceStore, P: PreferenceStore> Session<S, P> {
    /// Looks up a request of the selected project.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown request.
    pub fn request(&self, request_id: &str) -> ApplicationResult<&ApiRequest> {
        self.requests
            .iter()
            .find(|r| r.id == request_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("request {request_id}")))
    }

    /// Requests of one folder in position order.
    #[must_use]
    pub fn folder_requests(&self, folder_id: &str) -> Vec<&ApiRequest> {
        reorder::folder_requests(&self.requests, folder_id)
    }

    /// Appends a new empty GET request to a folder.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown folder, or a store error.
    pub async fn create_request(&mut self, folder_id: &str) -> ApplicationResult<ApiRequest> {
        self.folder(folder_id)?;
        let position = reorder::next_position(&self.requests, folder_id);
        let request = ApiRequest::new(folder_id, NEW_REQUEST_NAME).with_position(position);
        self.store
            .insert_requests(std::slice::from_ref(&request))
            .await?;
        self.requests.push(request.clone());
        Ok(request)
    }

    /// Persists an edited request. Folder and position are kept as stored;
    /// use [`Session::move_request`] to change them.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown request, or a store error.
    pub async fn save_request(&mut self, request: ApiRequest) -> ApplicationResult<ApiRequest> {
        let current = self.request(&request.id)?;
        let mut request = request;
        request.folder_id.clone_from(&current.folder_id);
        request.position = current.position;

        self.store.update_request(&request).await?;
        if let Some(slot) = self.requests.iter_mut().find(|r| r.id == request.id) {
            *slot = request.clone();
        }
        Ok(request)
    }

    /// Copies a request to the end of its folder. The copy is named
    /// `"<name> (Copy)"` and carries no auth.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown request, or a store error.
    pub async fn duplicate_request(&mut self, request_id: &str) -> ApplicationResult<ApiRequest> {
        let original = self.request(request_id)?;
        let position = reorder::next_position(&self.requests, &original.folder_id);

        let mut copy = original.clone();
        copy.id = courier_domain::generate_id();
        copy.name = format!("{} (Copy)", original.name);
        copy.auth = AuthDetails::None;
        copy.position = position;

        self.store
            .insert_requests(std::slice::from_ref(&copy))
            .await?;
        self.requests.push(copy.clone());
        Ok(copy)
    }

    /// Deletes a request and re-numbers the rest of its folder.
    ///
    /// # Errors
    /// Returns `NotFound`, or the store error. A failed re-number reloads
    /// the project before the error is returned.
    pub async fn delete_request(&mut self, request_id: &str) -> ApplicationResult<()> {
        let folder_id = self.request(request_id)?.folder_id.clone();
        self.store.delete_request(request_id).await?;
        self.requests.retain(|r| r.id != request_id);

        let updates = reorder::reindex_folder(&mut self.requests, &folder_id);
        self.write_positions(&updates).await
    }

    /// Moves a request to `target_index` inside `target_folder_id` and
    /// persists the new positions of every touched folder in one batch.
    ///
    /// The local lists are updated first. When the batch write fails the
    /// project is reloaded from the store and the error is returned.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown request or folder, or the store
    /// error.
    pub async fn move_request(
        &mut self,
        request_id: &str,
        target_folder_id: &str,
        target_index: usize,
    ) -> ApplicationResult<()> {
        self.folder(target_folder_id)?;
        let outcome = reorder::reorder(&self.requests, request_id, target_folder_id, target_index)
            .ok_or_else(|| ApplicationError::NotFound(format!("request {request_id}")))?;

        self.requests = outcome.requests;
        self.write_positions(&outcome.updates).await
    }

    /// Applies a drop gesture. Returns false when the drop changes nothing,
    /// as when a request is dropped onto itself.
    ///
    /// # Errors
    /// See [`Session::move_request`].
    pub async fn drop_request(
        &mut self,
        request_id: &str,
        target: &DropTarget,
    ) -> ApplicationResult<bool> {
        self.request(request_id)?;
        let Some((folder_id, index)) = reorder::resolve_drop(&self.requests, request_id, target)
        else {
            return Ok(false);
        };
        self.move_request(request_id, &folder_id, index).await?;
        Ok(true)
    }

    async fn write_positions(&mut self, updates: &[PositionUpdate]) -> ApplicationResult<()> {
        if updates.is_empty() {
            return Ok(());
        }
        if let Err(error) = self.store.update_positions(updates).await {
            tracing::error!(%error, "failed to persist request order, reloading");
            self.refresh_project_data().await?;
            return Err(error.into());
        }
        Ok(())
    }
}
