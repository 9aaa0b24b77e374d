//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod preferences;
mod store;
mod transport;

pub use preferences::{PreferenceError, PreferenceStore};
pub use store::{StoreError, WorkspaceStore};
pub use transport::{HttpTransport, OutgoingBody, OutgoingRequest, RawResponse, TransportError};
