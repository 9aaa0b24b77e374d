//! Projects and folders.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;

/// Top-level workspace grouping folders and environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Project {
    /// Creates a project, rejecting blank names.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] when `name` is blank.
    pub fn new(name: impl Into<String>, description: Option<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("project name"));
        }
        Ok(Self {
            id: generate_id(),
            name,
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// A named group of requests inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Folder identifier
    pub id: String,
    /// Owning project
    pub project_id: String,
    /// Display name
    pub name: String,
}

impl Folder {
    /// Creates a folder, rejecting blank names.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] when `name` is blank.
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("folder name"));
        }
        Ok(Self {
            id: generate_id(),
            project_id: project_id.into(),
            name,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_project_requires_name() {
        assert_eq!(
            Project::new("  ", None).unwrap_err(),
            DomainError::EmptyField("project name")
        );
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let project = Project::new("Billing", Some(" ".to_string())).unwrap();
        assert_eq!(project.description, None);
    }

    #[test]
    fn test_folder_keeps_project_reference() {
        let folder = Folder::new("p-1", "Auth").unwrap();
        assert_eq!(folder.project_id, "p-1");
        assert!(Folder::new("p-1", "").is_err());
    }
}
