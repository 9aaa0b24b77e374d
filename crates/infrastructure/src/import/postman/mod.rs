//! Postman Collection v2.1 import.

mod parser;
mod types;
mod warning;

pub use parser::{ParsedCollection, UNTITLED_COLLECTION, parse_collection};
pub use types::*;
pub use warning::ImportWarning;
