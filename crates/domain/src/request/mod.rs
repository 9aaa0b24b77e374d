//! Request definitions stored inside folders.

mod auth;
mod body;
mod method;

pub use auth::AuthDetails;
pub use body::{BodyType, FormDataEntry, encode_form_data, parse_form_data};
pub use method::HttpMethod;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// Header map as stored on a request. Keys keep the casing the user typed.
pub type HeaderMap = BTreeMap<String, String>;

/// Captures a value from a successful JSON response into an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRule {
    /// Rule identifier
    pub id: String,
    /// JSON-path expression evaluated against the response body
    #[serde(default)]
    pub json_path: String,
    /// Name of the environment variable receiving the first match
    #[serde(default)]
    pub target_variable: String,
}

impl ExtractionRule {
    /// Creates a new rule with a fresh id.
    #[must_use]
    pub fn new(json_path: impl Into<String>, target_variable: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            json_path: json_path.into(),
            target_variable: target_variable.into(),
        }
    }

    /// A rule only applies once both halves are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.json_path.is_empty() && !self.target_variable.is_empty()
    }
}

/// A saved HTTP request (the unit users run, reorder and export).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Request identifier
    pub id: String,
    /// Owning folder
    pub folder_id: String,
    /// Display name
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL, may contain `{{variables}}`
    #[serde(default)]
    pub url: String,
    /// Request headers
    #[serde(default)]
    pub headers: HeaderMap,
    /// Authentication descriptor
    #[serde(default)]
    pub auth: AuthDetails,
    /// How `body` is interpreted
    #[serde(default)]
    pub body_type: BodyType,
    /// Raw body text
    #[serde(default)]
    pub body: String,
    /// Zero-based order inside the folder
    #[serde(default)]
    pub position: usize,
    /// Rules applied to successful responses
    #[serde(default)]
    pub extraction_rules: Vec<ExtractionRule>,
}

impl ApiRequest {
    /// Creates an empty GET request in `folder_id`.
    #[must_use]
    pub fn new(folder_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            folder_id: folder_id.into(),
            name: name.into(),
            method: HttpMethod::Get,
            url: String::new(),
            headers: HeaderMap::new(),
            auth: AuthDetails::None,
            body_type: BodyType::None,
            body: String::new(),
            position: 0,
            extraction_rules: Vec::new(),
        }
    }

    /// Sets the method and URL.
    #[must_use]
    pub fn with_target(mut self, method: HttpMethod, url: impl Into<String>) -> Self {
        self.method = method;
        self.url = url.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the body and its type.
    #[must_use]
    pub fn with_body(mut self, body_type: BodyType, body: impl Into<String>) -> Self {
        self.body_type = body_type;
        self.body = body.into();
        self
    }

    /// Sets the auth descriptor.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthDetails) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the position.
    #[must_use]
    pub const fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Adds an extraction rule.
    #[must_use]
    pub fn with_rule(mut self, rule: ExtractionRule) -> Self {
        self.extraction_rules.push(rule);
        self
    }

    /// Finds a header key matching `name` case-insensitively.
    #[must_use]
    pub fn header_key(&self, name: &str) -> Option<&str> {
        find_header_key(&self.headers, name)
    }
}

/// Finds the stored key of a header, ignoring ASCII case.
#[must_use]
pub fn find_header_key<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .keys()
        .find(|key| key.eq_ignore_ascii_case(name))
        .map(String::as_str)
}

/// Removes every header matching `name` case-insensitively.
pub fn remove_header(headers: &mut HeaderMap, name: &str) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
}
