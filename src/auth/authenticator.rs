//! Authenticator implementation
//!
//! Handles applying authentication headers to requests.

use super::types::{AuthConfig, BasicAuth};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::RequestBuilder;

/// Header carrying base64 `username:password`
pub const PASSWORD_AUTH_HEADER: &str = "X-Cybozu-Authorization";

/// Header carrying comma-separated API tokens
pub const API_TOKEN_HEADER: &str = "X-Cybozu-API-Token";

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
    basic: Option<BasicAuth>,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            basic: None,
        }
    }

    /// Add an HTTP Basic layer
    #[must_use]
    pub fn with_basic(mut self, basic: BasicAuth) -> Self {
        self.basic = Some(basic);
        self
    }

    /// Get the auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Header name/value pairs for the configured credentials
    pub fn headers(&self) -> Result<Vec<(&'static str, String)>> {
        let mut headers = Vec::new();

        match &self.config {
            AuthConfig::None => {}
            AuthConfig::Password { username, password } => {
                if username.is_empty() {
                    return Err(Error::missing_argument("username"));
                }
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                headers.push((PASSWORD_AUTH_HEADER, encoded));
            }
            AuthConfig::ApiToken { tokens } => {
                let tokens: Vec<&str> = tokens
                    .iter()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .collect();
                if tokens.is_empty() {
                    return Err(Error::missing_argument("apiToken"));
                }
                headers.push((API_TOKEN_HEADER, tokens.join(",")));
            }
        }

        if let Some(basic) = &self.basic {
            let encoded = STANDARD.encode(format!("{}:{}", basic.username, basic.password));
            headers.push(("Authorization", format!("Basic {encoded}")));
        }

        Ok(headers)
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let mut req = req;
        for (key, value) in self.headers()? {
            req = req.header(key, value);
        }
        Ok(req)
    }
}
