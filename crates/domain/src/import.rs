//! Folder and request layout produced by a collection parser.
//!
//! Folders are referenced by name until they have been stored and received
//! identifiers.

use serde::{Deserialize, Serialize};

use crate::request::{ApiRequest, BodyType, HeaderMap, HttpMethod};

/// A request waiting for its folder to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRequest {
    /// Name of the folder the request belongs to
    pub folder_name: String,
    /// Request name
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// URL
    pub url: String,
    /// Enabled headers
    pub headers: HeaderMap,
    /// Inferred body type
    pub body_type: BodyType,
    /// Body text
    pub body: String,
    /// Position inside the folder
    pub position: usize,
}

impl PlannedRequest {
    /// Materializes the request inside a stored folder. Imported requests
    /// carry no auth and no extraction rules.
    #[must_use]
    pub fn into_request(self, folder_id: &str) -> ApiRequest {
        let mut request = ApiRequest::new(folder_id, self.name)
            .with_target(self.method, self.url)
            .with_body(self.body_type, self.body)
            .with_position(self.position);
        request.headers = self.headers;
        request
    }
}

/// Parsed collection: folder names in creation order and the requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPlan {
    /// Name of the collection, also the name of its top-level folder
    pub collection_name: String,
    /// Unique folder names in the order they were first seen
    pub folders: Vec<String>,
    /// Requests in document order
    pub requests: Vec<PlannedRequest>,
}

impl ImportPlan {
    /// Registers a folder name once.
    pub fn add_folder(&mut self, name: &str) {
        if !self.folders.iter().any(|f| f == name) {
            self.folders.push(name.to_string());
        }
    }

    /// Next free position inside `folder_name`.
    #[must_use]
    pub fn next_position(&self, folder_name: &str) -> usize {
        self.requests
            .iter()
            .filter(|r| r.folder_name == folder_name)
            .count()
    }
}

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Folders created
    pub folders: usize,
    /// Requests created
    pub requests: usize,
    /// Requests dropped because their folder could not be resolved
    pub skipped: usize,
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Successfully imported {} folders and {} requests.",
            self.folders, self.requests
        )
    }
}
