//! Courier Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (store, preferences, HTTP transport)
//! - Variable resolution, JSON-path extraction and the request executor
//! - The client session that orchestrates projects, folders, requests and
//!   environments

pub mod error;
pub mod executor;
pub mod extraction;
pub mod json_path;
pub mod ports;
pub mod preferences;
pub mod session;
pub mod use_cases;
pub mod variable_resolver;

#[cfg(test)]
mod testing;

pub use error::{ApplicationError, ApplicationResult};
pub use executor::{ExecuteError, RequestExecutor, RunSlot, RunTicket, apply_proxy, prepare};
pub use extraction::{Extraction, extract};
pub use ports::{
    HttpTransport, OutgoingBody, OutgoingRequest, PreferenceError, PreferenceStore, RawResponse,
    StoreError, TransportError, WorkspaceStore,
};
pub use preferences::Preferences;
pub use session::{RunOutcome, Session};
pub use use_cases::{ImportCollection, ImportCollectionInput};
