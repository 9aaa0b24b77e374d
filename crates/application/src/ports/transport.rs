//! HTTP transport port

use std::collections::BTreeMap;
use std::future::Future;

use courier_domain::{FormDataEntry, HttpMethod};
use tokio_util::sync::CancellationToken;

/// Body of an outgoing call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutgoingBody {
    /// No body.
    #[default]
    None,
    /// Raw text (JSON or plain).
    Text(String),
    /// Multipart text fields. The transport sets the boundary header.
    Multipart(Vec<FormDataEntry>),
    /// Opaque bytes supplied by the caller.
    Binary(Vec<u8>),
}

/// Fully assembled call, after substitution, auth, proxy and body encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Final URL
    pub url: String,
    /// Headers
    pub headers: BTreeMap<String, String>,
    /// Body
    pub body: OutgoingBody,
}

/// What came back over the wire, before body classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Status code
    pub status: u16,
    /// Reason phrase, when the transport knows one
    pub status_text: Option<String>,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Body decoded as text
    pub body: String,
}

/// Errors a transport may report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value cannot be sent.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Connection could not be established or was lost.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The call was cancelled.
    #[error("Request was cancelled.")]
    Cancelled,

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for sending HTTP calls.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpTransport: Send + Sync {
    /// Sends a call and reads the full response body.
    ///
    /// The token is checked before dispatch and again once headers arrive.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, unreadable bodies or
    /// cancellation. Non-2xx statuses are not errors.
    fn send(
        &self,
        request: &OutgoingRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}
