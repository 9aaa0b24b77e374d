//! Standalone developer tools: JWT decoding and document diffing.

mod diff;
mod jwt;

pub use diff::{DiffLine, DiffTag, JsonDiff, diff_documents, normalize};
pub use jwt::{DecodedJwt, JwtError, decode_jwt};
