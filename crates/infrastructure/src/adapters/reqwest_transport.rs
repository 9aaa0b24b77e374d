//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest
//! library. Cancellation is observed while connecting, once headers have
//! arrived, and while the body is read.

use std::collections::BTreeMap;
use std::future::Future;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Url};
use tokio_util::sync::CancellationToken;

use courier_application::ports::{
    HttpTransport, OutgoingBody, OutgoingRequest, RawResponse, TransportError,
};
use courier_domain::HttpMethod;

/// User agent sent with every call.
pub const USER_AGENT: &str = concat!("Courier/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Redirects are followed up to 10 hops. No overall timeout is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport around an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the outgoing body.
    fn attach_body(builder: reqwest::RequestBuilder, body: &OutgoingBody) -> reqwest::RequestBuilder {
        match body {
            OutgoingBody::None => builder,
            OutgoingBody::Text(text) => builder.body(text.clone()),
            OutgoingBody::Binary(bytes) => builder.body(bytes.clone()),
            OutgoingBody::Multipart(entries) => {
                let form = entries.iter().fold(Form::new(), |form, entry| {
                    form.text(entry.key.clone(), entry.value.clone())
                });
                builder.multipart(form)
            }
        }
    }

    /// Checks a user-supplied header before it reaches the builder.
    fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), TransportError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::InvalidHeader(format!("'{name}' is not a valid name")))?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            TransportError::InvalidHeader(format!("value of '{name}' contains invalid characters"))
        })?;
        Ok((header_name, header_value))
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error) -> TransportError {
        let message = error.to_string();
        if error.is_connect() || error.is_timeout() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            return TransportError::Connection(format!("{host}: {message}"));
        }
        if error.is_builder() {
            return TransportError::InvalidUrl(message);
        }
        if error.is_body() || error.is_decode() {
            return TransportError::Body(message);
        }
        TransportError::Other(message)
    }

    async fn exchange(
        &self,
        request: &OutgoingRequest,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            let (name, value) = Self::header_pair(name, value)?;
            builder = builder.header(name, value);
        }
        builder = Self::attach_body(builder, &request.body);

        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(TransportError::Cancelled),
            result = builder.send() => result.map_err(|e| Self::map_error(&e))?,
        };

        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        let status = response.status();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let bytes = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(TransportError::Cancelled),
            result = response.bytes() => result.map_err(|e| TransportError::Body(e.to_string()))?,
        };

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().map(str::to_string),
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: &OutgoingRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        self.exchange(request, cancel)
    }
}
