//! Postman Collection v2.1 type definitions.
//!
//! Only the fields Courier reads or writes are modeled; everything else in a
//! document is ignored on input. All fields are optional or defaulted so that
//! collections produced by other tools still deserialize.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Schema URL written into exported collections.
pub const POSTMAN_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Root structure of a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    #[serde(default)]
    pub item: Vec<PostmanItem>,
}

/// Collection metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanInfo {
    #[serde(rename = "_postman_id", default, skip_serializing_if = "Option::is_none")]
    pub postman_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A folder (has `item`) or a request (has `request`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Self>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<PostmanRequest>,
}

/// Request definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub header: Vec<PostmanHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PostmanBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<PostmanUrl>,
}

/// URL as a plain string or as a structured object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostmanUrl {
    Raw(String),
    Structured(PostmanUrlObject),
}

impl PostmanUrl {
    /// The raw URL, empty when a structured URL has no `raw`.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Raw(raw) => raw,
            Self::Structured(object) => object.raw.as_deref().unwrap_or_default(),
        }
    }
}

/// Structured URL. `host` and `path` may be strings or arrays in the wild,
/// so they are kept as loose JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanUrlObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<serde_json::Value>,
}

/// A header line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanHeader {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// Request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanBody {
    #[serde(default)]
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formdata: Option<Vec<PostmanFormField>>,
}

/// A multipart field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanFormField {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl PostmanFormField {
    /// Fields without a type are text fields.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind.as_deref().is_none_or(|kind| kind == "text")
    }
}
