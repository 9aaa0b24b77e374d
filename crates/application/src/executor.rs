//! Request executor
//!
//! Turns a stored request into a wire call: variable resolution, auth
//! header derivation, proxy rewriting and body encoding, then dispatch
//! through an [`HttpTransport`] under a cancellation token.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use courier_domain::request::{find_header_key, remove_header};
use courier_domain::{ApiRequest, ApiResponse, BodyType, Environment, parse_form_data};

use crate::ports::{HttpTransport, OutgoingBody, OutgoingRequest, TransportError};
use crate::variable_resolver::resolve_request;

/// Placeholder replaced by the encoded target URL inside a proxy template.
pub const PROXY_URL_PLACEHOLDER: &str = "{url}";

/// Errors raised while executing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    /// A form-data body that is not valid JSON.
    #[error("Invalid Form Data: Body must be a valid JSON array of key-value pairs.")]
    InvalidFormData,

    /// The run was cancelled before it completed.
    #[error("Request was cancelled.")]
    Cancelled,

    /// The transport failed.
    #[error("{0}")]
    Transport(TransportError),
}

impl From<TransportError> for ExecuteError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Cancelled => Self::Cancelled,
            other => Self::Transport(other),
        }
    }
}

/// Rewrites `url` through a proxy template.
///
/// A template containing `{url}` gets the percent-encoded URL in place of
/// the first placeholder; any other non-empty template is used as a prefix.
#[must_use]
pub fn apply_proxy(url: &str, template: Option<&str>) -> String {
    match template.filter(|t| !t.is_empty()) {
        None => url.to_string(),
        Some(t) if t.contains(PROXY_URL_PLACEHOLDER) => {
            t.replacen(PROXY_URL_PLACEHOLDER, &urlencoding::encode(url), 1)
        }
        Some(t) => format!("{t}{url}"),
    }
}

/// Assembles the outgoing call for an already resolved request.
///
/// GET never carries a body. JSON and text bodies get a default
/// `Content-Type` unless one is set; form data drops any `Content-Type` so
/// the transport can add the multipart boundary; binary uses `payload`
/// verbatim. Empty JSON, text and form-data bodies send nothing.
///
/// # Errors
///
/// Returns [`ExecuteError::InvalidFormData`] when a form-data body is not
/// valid JSON.
pub fn prepare(
    request: &ApiRequest,
    proxy: Option<&str>,
    payload: Option<Vec<u8>>,
) -> Result<OutgoingRequest, ExecuteError> {
    let mut headers = request.headers.clone();
    let mut body = OutgoingBody::None;

    if request.method.sends_body() {
        match request.body_type {
            BodyType::Json | BodyType::Text if !request.body.is_empty() => {
                if find_header_key(&headers, "Content-Type").is_none() {
                    if let Some(content_type) = request.body_type.default_content_type() {
                        headers.insert("Content-Type".to_string(), content_type.to_string());
                    }
                }
                body = OutgoingBody::Text(request.body.clone());
            }
            BodyType::FormData if !request.body.is_empty() => {
                let entries = parse_form_data(&request.body).map_err(|error| {
                    tracing::debug!(%error, "form-data body is not valid JSON");
                    ExecuteError::InvalidFormData
                })?;
                remove_header(&mut headers, "Content-Type");
                body = OutgoingBody::Multipart(entries);
            }
            BodyType::Binary => {
                if let Some(bytes) = payload {
                    body = OutgoingBody::Binary(bytes);
                }
            }
            BodyType::None | BodyType::Json | BodyType::Text | BodyType::FormData => {}
        }
    }

    Ok(OutgoingRequest {
        method: request.method,
        url: apply_proxy(&request.url, proxy),
        headers,
        body,
    })
}

/// Executes requests through a transport.
pub struct RequestExecutor<T: HttpTransport> {
    transport: Arc<T>,
}

impl<T: HttpTransport> Clone for RequestExecutor<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: HttpTransport> RequestExecutor<T> {
    /// Creates a new executor with the given transport.
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Resolves, assembles and sends a request.
    ///
    /// Non-2xx statuses are returned as responses. Elapsed time covers
    /// dispatch through the end of the body read.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError`] for malformed form data, transport failures
    /// and cancellation.
    pub async fn execute(
        &self,
        request: &ApiRequest,
        environment: Option<&Environment>,
        proxy: Option<&str>,
        cancel: &CancellationToken,
        payload: Option<Vec<u8>>,
    ) -> Result<ApiResponse, ExecuteError> {
        let resolved = resolve_request(request, environment);
        let outgoing = prepare(&resolved, proxy, payload)?;

        if cancel.is_cancelled() {
            return Err(ExecuteError::Cancelled);
        }

        tracing::debug!(method = %outgoing.method, url = %outgoing.url, "dispatching request");
        let started = Instant::now();

        let raw = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ExecuteError::Cancelled),
            result = self.transport.send(&outgoing, cancel) => result?,
        };

        let time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        Ok(ApiResponse::from_raw(
            raw.status,
            raw.status_text,
            raw.headers,
            &raw.body,
            time_ms,
        ))
    }
}

/// Handle for one run started on a [`RunSlot`].
#[derive(Debug, Clone)]
pub struct RunTicket {
    generation: u64,
    token: CancellationToken,
}

impl RunTicket {
    /// Token the run must honor.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[derive(Debug, Default)]
struct SlotState {
    generation: u64,
    current: Option<CancellationToken>,
}

/// Single-run slot: starting a run cancels the one before it.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct RunSlot {
    state: Arc<Mutex<SlotState>>,
}

impl RunSlot {
    /// Creates an idle slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any run in progress and starts a new one.
    #[must_use]
    pub fn begin(&self) -> RunTicket {
        let mut state = self.state.lock();
        if let Some(previous) = state.current.take() {
            previous.cancel();
        }
        state.generation += 1;
        let token = CancellationToken::new();
        state.current = Some(token.clone());
        RunTicket {
            generation: state.generation,
            token,
        }
    }

    /// Cancels the run in progress. Returns false when the slot was idle.
    pub fn cancel(&self) -> bool {
        self.state.lock().current.take().is_some_and(|token| {
            token.cancel();
            true
        })
    }

    /// Marks a run as finished. A ticket superseded by a later run is ignored.
    pub fn finish(&self, ticket: &RunTicket) {
        let mut state = self.state.lock();
        if state.generation == ticket.generation {
            state.current = None;
        }
    }

    /// Returns true while a run is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.lock().current.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::RawResponse;
    use courier_domain::{AuthDetails, FormDataEntry, HttpMethod, ResponseBody};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::time::Duration;

    /// Transport that records the last call and answers after an optional delay.
    struct MockTransport {
        last: Mutex<Option<OutgoingRequest>>,
        delay: Duration,
        response: Result<RawResponse, TransportError>,
    }

    impl MockTransport {
        fn ok(body: &str) -> Self {
            Self {
                last: Mutex::new(None),
                delay: Duration::ZERO,
                response: Ok(RawResponse {
                    status: 200,
                    status_text: Some("OK".to_string()),
                    headers: BTreeMap::new(),
                    body: body.to_string(),
                }),
            }
        }

        fn failing(error: TransportError) -> Self {
            Self {
                last: Mutex::new(None),
                delay: Duration::ZERO,
                response: Err(error),
            }
        }

        fn slow(body: &str, delay: Duration) -> Self {
            Self {
                delay,
                ..Self::ok(body)
            }
        }
    }

    impl HttpTransport for MockTransport {
        fn send(
            &self,
            request: &OutgoingRequest,
            _cancel: &CancellationToken,
        ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
            *self.last.lock() = Some(request.clone());
            let response = self.response.clone();
            let delay = self.delay;
            async move {
                tokio::time::sleep(delay).await;
                response
            }
        }
    }

    fn post(body_type: BodyType, body: &str) -> ApiRequest {
        ApiRequest::new("f", "r")
            .with_target(HttpMethod::Post, "https://api.test/items")
            .with_body(body_type, body)
    }

    #[test]
    fn test_proxy_placeholder_is_encoded() {
        assert_eq!(
            apply_proxy("https://a.test/x?y=1", Some("https://proxy.test/?target={url}")),
            "https://proxy.test/?target=https%3A%2F%2Fa.test%2Fx%3Fy%3D1"
        );
    }

    #[test]
    fn test_proxy_prefix_and_none() {
        assert_eq!(
            apply_proxy("https://a.test", Some("https://cors.test/")),
            "https://cors.test/https://a.test"
        );
        assert_eq!(apply_proxy("https://a.test", None), "https://a.test");
        assert_eq!(apply_proxy("https://a.test", Some("")), "https://a.test");
    }

    #[test]
    fn test_json_body_sets_content_type_when_absent() {
        let outgoing = prepare(&post(BodyType::Json, "{}"), None, None).unwrap();
        assert_eq!(
            outgoing.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(outgoing.body, OutgoingBody::Text("{}".to_string()));
    }

    #[test]
    fn test_user_content_type_is_kept() {
        let request = post(BodyType::Text, "hi").with_header("content-type", "text/csv");
        let outgoing = prepare(&request, None, None).unwrap();
        assert_eq!(outgoing.headers.len(), 1);
        assert_eq!(outgoing.headers.get("content-type").map(String::as_str), Some("text/csv"));
    }

    #[test]
    fn test_get_sends_no_body() {
        let request = post(BodyType::Json, "{}").with_target(HttpMethod::Get, "https://a.test");
        let outgoing = prepare(&request, None, None).unwrap();
        assert_eq!(outgoing.body, OutgoingBody::None);
        assert!(outgoing.headers.is_empty());
    }

    #[test]
    fn test_form_data_drops_content_type() {
        let request = post(BodyType::FormData, r#"[{"key":"a","value":"1"},{"key":"","value":"2"}]"#)
            .with_header("Content-Type", "application/json");
        let outgoing = prepare(&request, None, None).unwrap();
        assert!(outgoing.headers.is_empty());
        assert_eq!(
            outgoing.body,
            OutgoingBody::Multipart(vec![FormDataEntry::new("a", "1")])
        );
    }

    #[test]
    fn test_malformed_form_data_is_an_error() {
        let error = prepare(&post(BodyType::FormData, "{not json"), None, None).unwrap_err();
        assert_eq!(error, ExecuteError::InvalidFormData);
        assert_eq!(
            error.to_string(),
            "Invalid Form Data: Body must be a valid JSON array of key-value pairs."
        );
    }

    #[test]
    fn test_binary_uses_payload_without_content_type() {
        let outgoing = prepare(&post(BodyType::Binary, ""), None, Some(vec![1, 2, 3])).unwrap();
        assert_eq!(outgoing.body, OutgoingBody::Binary(vec![1, 2, 3]));
        assert!(outgoing.headers.is_empty());

        let outgoing = prepare(&post(BodyType::Binary, ""), None, None).unwrap();
        assert_eq!(outgoing.body, OutgoingBody::None);
    }

    #[test]
    fn test_empty_raw_body_sends_nothing() {
        let outgoing = prepare(&post(BodyType::Json, ""), None, None).unwrap();
        assert_eq!(outgoing.body, OutgoingBody::None);
        assert!(outgoing.headers.is_empty());
    }

    #[tokio::test]
    async fn test_execute_resolves_and_parses() {
        let transport = Arc::new(MockTransport::ok(r#"{"ok":true}"#));
        let executor = RequestExecutor::new(Arc::clone(&transport));
        let env = Environment::new("p", "Local")
            .unwrap()
            .with_variable("host", "https://api.test")
            .with_variable("tok", "abc");
        let request = ApiRequest::new("f", "r")
            .with_target(HttpMethod::Get, "{{host}}/me")
            .with_auth(AuthDetails::bearer("{{tok}}"));

        let response = executor
            .execute(&request, Some(&env), None, &CancellationToken::new(), None)
            .await
            .unwrap();

        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.body, ResponseBody::Json(serde_json::json!({"ok": true})));
        assert_eq!(response.size, 11);

        let sent = transport.last.lock().clone().unwrap();
        assert_eq!(sent.url, "https://api.test/me");
        assert_eq!(
            sent.headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
    }

    #[tokio::test]
    async fn test_execute_pre_cancelled() {
        let executor = RequestExecutor::new(Arc::new(MockTransport::ok("{}")));
        let token = CancellationToken::new();
        token.cancel();
        let error = executor
            .execute(&ApiRequest::new("f", "r"), None, None, &token, None)
            .await
            .unwrap_err();
        assert_eq!(error, ExecuteError::Cancelled);
        assert_eq!(error.to_string(), "Request was cancelled.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_flight() {
        let executor =
            RequestExecutor::new(Arc::new(MockTransport::slow("{}", Duration::from_secs(30))));
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let error = executor
            .execute(&ApiRequest::new("f", "r"), None, None, &token, None)
            .await
            .unwrap_err();
        assert_eq!(error, ExecuteError::Cancelled);
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let executor = RequestExecutor::new(Arc::new(MockTransport::failing(
            TransportError::Connection("refused".to_string()),
        )));
        let error = executor
            .execute(&ApiRequest::new("f", "r"), None, None, &CancellationToken::new(), None)
            .await
            .unwrap_err();
        assert_eq!(
            error,
            ExecuteError::Transport(TransportError::Connection("refused".to_string()))
        );

        let executor =
            RequestExecutor::new(Arc::new(MockTransport::failing(TransportError::Cancelled)));
        let error = executor
            .execute(&ApiRequest::new("f", "r"), None, None, &CancellationToken::new(), None)
            .await
            .unwrap_err();
        assert_eq!(error, ExecuteError::Cancelled);
    }

    #[tokio::test]
    async fn test_non_json_body_is_text() {
        let executor = RequestExecutor::new(Arc::new(MockTransport::ok("<html></html>")));
        let response = executor
            .execute(&ApiRequest::new("f", "r"), None, None, &CancellationToken::new(), None)
            .await
            .unwrap();
        assert_eq!(response.body, ResponseBody::Text("<html></html>".to_string()));
    }

    #[test]
    fn test_new_run_cancels_previous() {
        let slot = RunSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(first.token().is_cancelled());
        assert!(!second.token().is_cancelled());

        slot.finish(&first);
        assert!(slot.is_running());
        slot.finish(&second);
        assert!(!slot.is_running());
    }

    #[test]
    fn test_cancel_slot() {
        let slot = RunSlot::new();
        assert!(!slot.cancel());
        let ticket = slot.begin();
        let shared = slot.clone();
        assert!(shared.cancel());
        assert!(ticket.token().is_cancelled());
        assert!(!slot.is_running());
    }
}
