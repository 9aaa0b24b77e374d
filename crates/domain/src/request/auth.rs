//! Authentication descriptor attached to a request.

use serde::{Deserialize, Serialize};

/// How a request authenticates.
///
/// The `Authorization` header is always derived from this descriptor at run
/// time, replacing any header typed by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthDetails {
    /// No authentication.
    #[default]
    None,
    /// `Authorization: Bearer <token>`
    Bearer {
        /// The bearer token, may contain `{{variables}}`.
        #[serde(default)]
        token: String,
    },
    /// `Authorization: Basic <base64(username:password)>`
    Basic {
        /// The username, may contain `{{variables}}`.
        #[serde(default)]
        username: String,
        /// The password, may contain `{{variables}}`.
        #[serde(default)]
        password: String,
    },
}

impl AuthDetails {
    /// Creates a bearer descriptor.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Creates a basic descriptor.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Short label used in listings.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bearer { .. } => "bearer",
            Self::Basic { .. } => "basic",
        }
    }
}
