//! Persistence adapters for the workspace and preference ports.

mod file_store;
mod memory_store;
mod preference_store;
mod tables;

pub use file_store::{FileWorkspaceStore, WORKSPACE_FILE};
pub use memory_store::MemoryWorkspaceStore;
pub use preference_store::{FilePreferenceStore, MemoryPreferenceStore, PREFERENCES_FILE};
pub use tables::WorkspaceTables;

use std::path::PathBuf;

/// Default data directory: the platform data directory plus `courier`.
///
/// Falls back to `.courier` in the working directory when the platform
/// has no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".courier"), |dir| dir.join("courier"))
}
