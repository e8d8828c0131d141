//! Error types for the kintone SDK
//!
//! This module defines the error hierarchy for the entire SDK.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error body returned by the REST API on non-2xx responses
///
/// ```json
/// {
///   "id": "RWt7OV6Pa40r1E3a2hgb",
///   "code": "CB_VA01",
///   "message": "Missing or invalid input.",
///   "errors": { "app": { "messages": ["must be greater than or equal to 1"] } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Request id assigned by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Error code (e.g. `CB_VA01`)
    #[serde(default)]
    pub code: String,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Per-field validation details, keyed by field path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl ErrorResponse {
    /// Decode an error body, falling back to a message derived from the status
    /// when the body is not a structured error object.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) if !response.code.is_empty() || !response.message.is_empty() => response,
            _ => Self {
                id: None,
                code: String::new(),
                message: status_message(status, body),
                errors: None,
            },
        }
    }

    /// Messages reported for a single field, if any
    pub fn field_messages(&self, field: &str) -> Vec<String> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .and_then(|entry| entry.get("messages"))
            .and_then(Value::as_array)
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn status_message(status: u16, body: &str) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown status");
    let body = body.trim();
    if body.is_empty() {
        format!("{status} {reason}")
    } else {
        format!("{status} {reason}: {body}")
    }
}

/// The main error type for the kintone SDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Argument Errors
    // ============================================================================
    #[error("Error: {message}")]
    MissingArgument { message: String },

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("Error: {}", .response.message)]
    Api {
        status: u16,
        response: ErrorResponse,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing argument error for a required request parameter
    pub fn missing_argument(argument: impl AsRef<str>) -> Self {
        Self::MissingArgument {
            message: format!("{} is a required argument.", argument.as_ref()),
        }
    }

    /// Create an API error from a response status and raw body
    pub fn api(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            response: ErrorResponse::from_body(status, body),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Structured error body, for errors reported by the server
    pub fn api_response(&self) -> Option<&ErrorResponse> {
        match self {
            Error::Api { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status of a server-reported error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the kintone SDK
pub type Result<T> = std::result::Result<T, Error>;
