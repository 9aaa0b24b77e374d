//! Application use cases (business logic orchestration).

mod import_collection;

pub use import_collection::*;
