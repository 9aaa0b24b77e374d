//! Deterministic JSON serialization for Courier data files.
//!
//! Files are written with 2-space indentation and a trailing newline, and
//! replaced atomically so a crash never leaves a truncated document.

mod json;

pub use json::*;
