//! Export format types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Indented plain-text outline.
    Text,
    /// One row per request.
    Csv,
    /// Postman Collection v2.1.0.
    Postman,
    /// Thunder Client collection.
    Thunder,
}

impl ExportFormat {
    /// Get all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Text, Self::Csv, Self::Postman, Self::Thunder]
    }

    /// Get the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Csv => "text/csv",
            Self::Postman | Self::Thunder => "application/json",
        }
    }

    /// Get the display name for this format.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Text => "Plain Text",
            Self::Csv => "CSV",
            Self::Postman => "Postman Collection",
            Self::Thunder => "Thunder Client",
        }
    }

    /// Download file name for a project.
    #[must_use]
    pub fn file_name(&self, project_name: &str) -> String {
        let slug = slugify(project_name);
        match self {
            Self::Text => format!("{slug}-export.txt"),
            Self::Csv => format!("{slug}-export.csv"),
            Self::Postman => format!("{slug}.postman_collection.json"),
            Self::Thunder => format!("thunder-collection_{slug}.json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "postman" => Ok(Self::Postman),
            "thunder" => Ok(Self::Thunder),
            other => Err(DomainError::UnknownExportFormat(other.to_string())),
        }
    }
}

/// Lowercases a name and replaces everything outside `[a-z0-9]` with `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect()
}

/// A rendered export ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Suggested file name
    pub file_name: String,
    /// MIME type
    pub mime_type: &'static str,
    /// Content
    pub content: String,
}
