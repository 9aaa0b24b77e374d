//! Export infrastructure.
//!
//! Renders a project with its folders and requests as plain text, CSV,
//! a Postman v2.1.0 collection or a Thunder Client collection.

mod csv;
mod postman;
mod text;
mod thunder;

pub use csv::CsvExporter;
pub use postman::PostmanExporter;
pub use text::TextExporter;
pub use thunder::ThunderExporter;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use courier_domain::{ApiRequest, ExportDocument, ExportFormat, Folder, Project};

use crate::serialization::to_json_stable;

/// Export error type.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Everything an exporter reads.
#[derive(Debug, Clone, Copy)]
pub struct ExportSource<'a> {
    /// The exported project
    pub project: &'a Project,
    /// Its folders in display order
    pub folders: &'a [Folder],
    /// Requests of those folders
    pub requests: &'a [ApiRequest],
    /// Timestamp written into formats that record one
    pub exported_at: DateTime<Utc>,
}

impl<'a> ExportSource<'a> {
    /// Creates a source stamped with the current time.
    #[must_use]
    pub fn new(project: &'a Project, folders: &'a [Folder], requests: &'a [ApiRequest]) -> Self {
        Self {
            project,
            folders,
            requests,
            exported_at: Utc::now(),
        }
    }

    /// Requests of one folder ordered by position.
    fn requests_in(&self, folder_id: &str) -> Vec<&'a ApiRequest> {
        let mut requests: Vec<&ApiRequest> = self
            .requests
            .iter()
            .filter(|r| r.folder_id == folder_id)
            .collect();
        requests.sort_by_key(|r| r.position);
        requests
    }

    /// Every request paired with its folder name, folder by folder.
    ///
    /// Requests whose folder is not part of the export come last with an
    /// empty folder name.
    fn rows(&self) -> Vec<(&'a str, &'a ApiRequest)> {
        let mut rows: Vec<(&str, &ApiRequest)> = self
            .folders
            .iter()
            .flat_map(|folder| {
                self.requests_in(&folder.id)
                    .into_iter()
                    .map(move |request| (folder.name.as_str(), request))
            })
            .collect();
        rows.extend(
            self.requests
                .iter()
                .filter(|r| !self.folders.iter().any(|f| f.id == r.folder_id))
                .map(|r| ("", r)),
        );
        rows
    }

    fn timestamp(&self) -> String {
        self.exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ExportError> {
    to_json_stable(value).map_err(|e| ExportError::Serialization(e.to_string()))
}

/// Renders `source` in `format`.
///
/// # Errors
///
/// Returns an error if a JSON format fails to serialize.
pub fn export_collection(
    source: &ExportSource<'_>,
    format: ExportFormat,
) -> Result<ExportDocument, ExportError> {
    let content = match format {
        ExportFormat::Text => TextExporter::export(source),
        ExportFormat::Csv => CsvExporter::export(source),
        ExportFormat::Postman => PostmanExporter::export(source)?,
        ExportFormat::Thunder => ThunderExporter::export(source)?,
    };

    tracing::debug!(
        project = %source.project.name,
        format = format.display_name(),
        requests = source.requests.len(),
        "exported collection"
    );

    Ok(ExportDocument {
        file_name: format.file_name(&source.project.name),
        mime_type: format.mime_type(),
        content,
    })
}
