//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer (HTTP transport, workspace and preference stores) along
//! with collection import/export and the JWT and diff tools.

pub mod adapters;
pub mod export;
pub mod import;
pub mod persistence;
pub mod serialization;
pub mod tools;

pub use adapters::ReqwestTransport;
pub use export::{ExportError, ExportSource, export_collection};
pub use import::{ImportError, ImportWarning, ParsedCollection, parse_collection};
pub use persistence::{
    FilePreferenceStore, FileWorkspaceStore, MemoryPreferenceStore, MemoryWorkspaceStore,
    WorkspaceTables, default_data_dir,
};
pub use serialization::{SerializationError, from_json, to_json_stable};
pub use tools::{DecodedJwt, JsonDiff, JwtError, decode_jwt, diff_documents};
