//! Environments: named variable sets substituted into requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;

/// Variable map of an environment. Ordered so persisted output is stable.
pub type VariableMap = BTreeMap<String, String>;

/// A named set of `{{key}}` substitutions belonging to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Environment identifier
    pub id: String,
    /// Owning project
    pub project_id: String,
    /// Display name
    pub name: String,
    /// Variables
    #[serde(default)]
    pub variables: VariableMap,
}

impl Environment {
    /// Creates an empty environment.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] when `name` is blank.
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("environment name"));
        }
        Ok(Self {
            id: generate_id(),
            project_id: project_id.into(),
            name,
            variables: VariableMap::new(),
        })
    }

    /// Adds a variable, builder style.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// Sorts environments by name, the order they are listed in.
pub fn sort_by_name(environments: &mut [Environment]) {
    environments.sort_by(|a, b| a.name.cmp(&b.name));
}
