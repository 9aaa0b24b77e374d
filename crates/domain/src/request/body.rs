//! HTTP Request body types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// How the stored body string of a request is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BodyType {
    /// No body
    #[default]
    None,
    /// JSON text, sent as `application/json`
    Json,
    /// Plain text, sent as `text/plain`
    Text,
    /// A JSON array of `{key, value}` pairs sent as multipart form data
    FormData,
    /// An external payload supplied at run time
    Binary,
}

impl BodyType {
    /// Returns the tag as stored and exported.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Text => "text",
            Self::FormData => "form-data",
            Self::Binary => "binary",
        }
    }

    /// Default `Content-Type` for raw bodies.
    #[must_use]
    pub const fn default_content_type(self) -> Option<&'static str> {
        match self {
            Self::Json => Some("application/json"),
            Self::Text => Some("text/plain"),
            Self::None | Self::FormData | Self::Binary => None,
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "form-data" | "formdata" => Ok(Self::FormData),
            "binary" => Ok(Self::Binary),
            other => Err(DomainError::UnknownBodyType(other.to_string())),
        }
    }
}

/// A single text field of a form-data body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDataEntry {
    /// Field name
    pub key: String,
    /// Field value
    pub value: String,
}

impl FormDataEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Parses a stored form-data body.
///
/// The body must be valid JSON. A JSON value that is not an array yields no
/// fields, elements without a non-empty `key` are skipped, and non-string
/// values are kept in their JSON text form.
///
/// # Errors
///
/// Returns the JSON error when the body is not valid JSON.
pub fn parse_form_data(body: &str) -> Result<Vec<FormDataEntry>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let Some(items) = value.as_array() else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| {
            let key = match item.get("key")? {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                _ => return None,
            };
            if key.is_empty() {
                return None;
            }
            let value = match item.get("value") {
                None | Some(serde_json::Value::Null) => String::new(),
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            Some(FormDataEntry { key, value })
        })
        .collect())
}

/// Serializes form-data entries into the stored body representation.
#[must_use]
pub fn encode_form_data(entries: &[FormDataEntry]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_body_type_tags() {
        assert_eq!(BodyType::FormData.as_str(), "form-data");
        assert_eq!("form-data".parse::<BodyType>().unwrap(), BodyType::FormData);
        assert_eq!(
            serde_json::to_string(&BodyType::FormData).unwrap(),
            "\"form-data\""
        );
        assert!("xml".parse::<BodyType>().is_err());
    }

    #[test]
    fn test_default_content_types() {
        assert_eq!(BodyType::Json.default_content_type(), Some("application/json"));
        assert_eq!(BodyType::Text.default_content_type(), Some("text/plain"));
        assert_eq!(BodyType::Binary.default_content_type(), None);
    }

    #[test]
    fn test_parse_form_data_skips_empty_keys() {
        let entries =
            parse_form_data(r#"[{"key":"a","value":"1"},{"key":"","value":"x"},{"value":"y"}]"#)
                .unwrap();
        assert_eq!(entries, vec![FormDataEntry::new("a", "1")]);
    }

    #[test]
    fn test_parse_form_data_non_array_is_empty() {
        assert!(parse_form_data(r#"{"key":"a"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_form_data_stringifies_values() {
        let entries = parse_form_data(r#"[{"key":"n","value":5},{"key":"m"}]"#).unwrap();
        assert_eq!(
            entries,
            vec![FormDataEntry::new("n", "5"), FormDataEntry::new("m", "")]
        );
    }

    #[test]
    fn test_parse_form_data_rejects_malformed_json() {
        assert!(parse_form_data("[{key: a}]").is_err());
    }

    #[test]
    fn test_encode_form_data() {
        let body = encode_form_data(&[FormDataEntry::new("a", "b")]);
        assert_eq!(body, r#"[{"key":"a","value":"b"}]"#);
    }
}
