//! Running and comparing requests.

use courier_domain::{ApiRequest, ApiResponse};

use super::Session;
use crate::error::ApplicationResult;
use crate::executor::{ExecuteError, RequestExecutor, RunSlot};
use crate::extraction::{self, Extraction};
use crate::ports::{HttpTransport, PreferenceStore, WorkspaceStore};

/// Result of a single run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The response
    pub response: ApiResponse,
    /// Variables captured into the active environment, if any
    pub extraction: Option<Extraction>,
    /// Why the captured variables could not be written to the store. The
    /// session lists hold them regardless.
    pub save_error: Option<String>,
}

impl<S: WorkspaceStore, P: PreferenceStore> Session<S, P> {
    /// Runs a stored request against the active environment.
    ///
    /// Starting a run cancels the previous run of this session. On a
    /// successful structured response the request's extraction rules update
    /// the active environment, which is written back before returning. A
    /// failed write is logged and reported in [`RunOutcome::save_error`].
    ///
    /// # Errors
    /// Returns `NotFound` or an [`ExecuteError`].
    pub async fn run_request<T: HttpTransport>(
        &mut self,
        executor: &RequestExecutor<T>,
        request_id: &str,
        payload: Option<Vec<u8>>,
    ) -> ApplicationResult<RunOutcome> {
        let request = self.request(request_id)?.clone();
        self.run(executor, &request, payload).await
    }

    /// Runs an unsaved request definition the same way as
    /// [`Session::run_request`].
    ///
    /// # Errors
    /// See [`Session::run_request`].
    pub async fn run(
        &mut self,
        executor: &RequestExecutor<impl HttpTransport>,
        request: &ApiRequest,
        payload: Option<Vec<u8>>,
    ) -> ApplicationResult<RunOutcome> {
        let proxy = self.preferences.proxy_template().await?;
        let environment = self.active_environment().cloned();

        let ticket = self.run_slot.begin();
        let result = executor
            .execute(
                request,
                environment.as_ref(),
                proxy.as_deref(),
                ticket.token(),
                payload,
            )
            .await;
        self.run_slot.finish(&ticket);
        let response = result?;

        let extraction =
            extraction::extract(&response, &request.extraction_rules, environment.as_ref());
        let mut save_error = None;
        if let Some(extracted) = &extraction {
            let updated = extracted.environment.clone();
            self.replace_environment(updated.clone());
            if let Err(error) = self.store.update_environment(&updated).await {
                tracing::error!(%error, environment = %updated.name, "failed to save extracted variables");
                save_error = Some(error.to_string());
            }
        }

        Ok(RunOutcome {
            response,
            extraction,
            save_error,
        })
    }

    /// Cancels the run in progress. Returns false when nothing was running.
    pub fn cancel_run(&self) -> bool {
        self.run_slot.cancel()
    }

    /// Handle on the run slot. Cancelling it stops the run in flight even
    /// while [`Session::run`] holds the session.
    #[must_use]
    pub fn run_slot(&self) -> RunSlot {
        self.run_slot.clone()
    }

    /// Handles on the two compare slots, left then right.
    #[must_use]
    pub fn compare_slots(&self) -> [RunSlot; 2] {
        self.compare_slots.clone()
    }

    /// Runs two requests concurrently and waits for both.
    ///
    /// Each side has its own slot; a new comparison cancels the sides of the
    /// previous one. Extraction rules are not applied.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown request or a preference error.
    /// Per-side failures are reported in the returned pair.
    pub async fn compare_requests<T: HttpTransport>(
        &self,
        executor: &RequestExecutor<T>,
        left_id: &str,
        right_id: &str,
    ) -> ApplicationResult<(
        Result<ApiResponse, ExecuteError>,
        Result<ApiResponse, ExecuteError>,
    )> {
        let left = self.request(left_id)?;
        let right = self.request(right_id)?;
        let proxy = self.preferences.proxy_template().await?;
        let environment = self.active_environment();

        let [left_slot, right_slot] = &self.compare_slots;
        let left_ticket = left_slot.begin();
        let right_ticket = right_slot.begin();

        let (left_result, right_result) = tokio::join!(
            executor.execute(
                left,
                environment,
                proxy.as_deref(),
                left_ticket.token(),
                None
            ),
            executor.execute(
                right,
                environment,
                proxy.as_deref(),
                right_ticket.token(),
                None
            ),
        );

        left_slot.finish(&left_ticket);
        right_slot.finish(&right_ticket);
        Ok((left_result, right_result))
    }
}
