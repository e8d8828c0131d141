//! Client configuration
//!
//! `ClientConfig` describes how to reach a kintone domain. It can be loaded
//! from a YAML or JSON file, parsed from a string, or assembled from
//! environment variables.

use crate::auth::{AuthConfig, Authenticator, BasicAuth};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::record::RecordClient;
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the domain
pub const ENV_DOMAIN: &str = "KINTONE_DOMAIN";
/// Environment variable holding the login name
pub const ENV_USERNAME: &str = "KINTONE_USERNAME";
/// Environment variable holding the password
pub const ENV_PASSWORD: &str = "KINTONE_PASSWORD";
/// Environment variable holding comma-separated API tokens
pub const ENV_API_TOKEN: &str = "KINTONE_API_TOKEN";
/// Environment variable holding the guest space id
pub const ENV_GUEST_SPACE_ID: &str = "KINTONE_GUEST_SPACE_ID";

// ============================================================================
// Client Config
// ============================================================================

/// Connection settings for a kintone domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Domain (e.g. `example.cybozu.com`) or full base URL
    pub domain: String,

    /// Authentication scheme
    #[serde(default)]
    pub auth: AuthConfig,

    /// Optional HTTP Basic layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,

    /// Guest space the apps live in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_space_id: Option<u64>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Config for a domain with no authentication
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            auth: AuthConfig::None,
            basic_auth: None,
            guest_space_id: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }

    /// Set the authentication scheme
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `KINTONE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup
    ///
    /// API tokens take precedence over a username/password pair.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).none_if_empty();

        let domain = get(ENV_DOMAIN).ok_or_else(|| Error::missing_field(ENV_DOMAIN))?;

        let auth = if let Some(tokens) = get(ENV_API_TOKEN) {
            AuthConfig::ApiToken {
                tokens: tokens
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
            }
        } else if let Some(username) = get(ENV_USERNAME) {
            let password = get(ENV_PASSWORD).ok_or_else(|| Error::missing_field(ENV_PASSWORD))?;
            AuthConfig::Password { username, password }
        } else {
            AuthConfig::None
        };

        let guest_space_id = get(ENV_GUEST_SPACE_ID)
            .map(|id| {
                id.trim().parse::<u64>().map_err(|e| {
                    Error::config(format!("Invalid {ENV_GUEST_SPACE_ID} '{id}': {e}"))
                })
            })
            .transpose()?;

        let config = Self {
            guest_space_id,
            ..Self::new(domain).with_auth(auth)
        };
        config.validate()?;
        Ok(config)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(Error::missing_field("domain"));
        }

        let base_url = self.http_config().base_url.unwrap_or_default();
        url::Url::parse(&base_url)?;

        match &self.auth {
            AuthConfig::None => {}
            AuthConfig::Password { username, .. } => {
                if username.is_empty() {
                    return Err(Error::missing_field("auth.username"));
                }
            }
            AuthConfig::ApiToken { tokens } => {
                if tokens.iter().all(|t| t.trim().is_empty()) {
                    return Err(Error::missing_field("auth.tokens"));
                }
            }
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    /// Transport settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .domain(&self.domain)
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(space) = self.guest_space_id {
            builder = builder.guest_space_id(space);
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Authenticator derived from this config
    pub fn authenticator(&self) -> Authenticator {
        let auth = Authenticator::new(self.auth.clone());
        match &self.basic_auth {
            Some(basic) => auth.with_basic(basic.clone()),
            None => auth,
        }
    }

    /// Build an HTTP client
    pub fn http_client(&self) -> Result<HttpClient> {
        let mut client = HttpClient::with_config(self.http_config())?;
        client.set_authenticator(self.authenticator());
        Ok(client)
    }

    /// Build a record client over HTTP
    pub fn record_client(&self) -> Result<RecordClient<HttpClient>> {
        Ok(RecordClient::new(self.http_client()?))
    }
}
