//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication headers
    #[default]
    None,

    /// User login with username and password
    Password {
        /// Login name
        username: String,
        /// Password
        password: String,
    },

    /// One or more API tokens (sent comma-separated)
    ApiToken {
        /// Token values
        tokens: Vec<String>,
    },
}

impl AuthConfig {
    /// Create password authentication
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create API token authentication from a single token
    pub fn api_token(token: impl Into<String>) -> Self {
        Self::ApiToken {
            tokens: vec![token.into()],
        }
    }
}

/// HTTP Basic credentials, applied in addition to the main auth scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    /// Basic auth user
    pub username: String,
    /// Basic auth password
    pub password: String,
}

impl BasicAuth {
    /// Create basic credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
