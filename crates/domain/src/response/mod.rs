//! Normalized response of a single request run.

mod status;

pub use status::{StatusCode, format_bytes};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response body, classified once when the response is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body was not JSON and is kept verbatim.
    Text(String),
}

impl ResponseBody {
    /// Parses raw body text, falling back to text when it is not JSON.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).map_or_else(|_| Self::Text(raw.to_string()), Self::Json)
    }

    /// Returns the JSON value when the body is an object or array.
    ///
    /// JSON primitives (`42`, `"x"`, `null`) are not structured.
    #[must_use]
    pub fn structured(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Pretty-printed rendering for display.
    #[must_use]
    pub fn pretty(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

/// Outcome of one HTTP exchange. Non-2xx statuses are still responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Status code
    pub status: StatusCode,
    /// Status text as reported by the transport
    pub status_text: String,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Parsed body
    pub body: ResponseBody,
    /// Byte length of the raw body text
    pub size: usize,
    /// Elapsed milliseconds from dispatch to body completion
    pub time_ms: u64,
}

impl ApiResponse {
    /// Builds a response from raw body text.
    #[must_use]
    pub fn from_raw(
        status: u16,
        status_text: Option<String>,
        headers: BTreeMap<String, String>,
        raw_body: &str,
        time_ms: u64,
    ) -> Self {
        let status = StatusCode::new(status);
        Self {
            status,
            status_text: status_text.unwrap_or_else(|| status.reason_phrase().to_string()),
            headers,
            body: ResponseBody::parse(raw_body),
            size: raw_body.len(),
            time_ms,
        }
    }

    /// Returns a header value by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Human-readable body size.
    #[must_use]
    pub fn size_display(&self) -> String {
        format_bytes(self.size)
    }

    /// One-line summary: `200 OK · 12 ms · 1.20 KB`.
    #[must_use]
    pub fn summary(&self) -> String {
        let status = if self.status_text.is_empty() {
            self.status.as_u16().to_string()
        } else {
            format!("{} {}", self.status.as_u16(), self.status_text)
        };
        format!("{status} · {} ms · {}", self.time_ms, self.size_display())
    }
}
