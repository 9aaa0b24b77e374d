//! Variable resolution module
//!
//! Provides parsing and substitution of `{{variable}}` syntax and the
//! request-level resolution step that runs before every dispatch.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::substitute;
//! use courier_domain::environment::VariableMap;
//!
//! let mut vars = VariableMap::new();
//! vars.insert("host".to_string(), "localhost".to_string());
//!
//! assert_eq!(substitute("http://{{host}}/api", &vars), "http://localhost/api");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{authorization_value, resolve_request, substitute, unresolved_variables};
pub use parser::{Placeholder, has_placeholders, parse_placeholders};
