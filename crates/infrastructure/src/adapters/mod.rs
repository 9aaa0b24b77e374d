//! Adapter implementations for application ports.

mod reqwest_transport;

pub use reqwest_transport::{ReqwestTransport, USER_AGENT};
