//! Courier Domain - Core business types
//!
//! Projects, folders, requests, environments and responses of the Courier
//! API client, plus the pure ordering rules for requests inside folders.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod export;
pub mod id;
pub mod import;
pub mod project;
pub mod reorder;
pub mod request;
pub mod response;
pub mod snippets;

pub use environment::{Environment, VariableMap};
pub use error::{DomainError, DomainResult};
pub use export::{ExportDocument, ExportFormat};
pub use id::generate_id;
pub use import::{ImportPlan, ImportSummary, PlannedRequest};
pub use project::{Folder, Project};
pub use reorder::{DropPlacement, DropTarget, PositionUpdate, ReorderOutcome};
pub use request::{
    ApiRequest, AuthDetails, BodyType, ExtractionRule, FormDataEntry, HeaderMap, HttpMethod,
    encode_form_data, parse_form_data,
};
pub use response::{ApiResponse, ResponseBody, StatusCode};
pub use snippets::{SavedComparison, SavedToken};
