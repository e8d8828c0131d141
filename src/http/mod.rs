//! HTTP client module
//!
//! Provides the transport the record APIs are issued through.
//!
//! # Features
//!
//! - **API Paths**: `/k/v1/<api>.json`, or the guest space variant
//! - **Authentication**: Integration with auth module
//! - **Structured Errors**: Non-2xx bodies decoded into `ErrorResponse`
//! - **Transport Trait**: The seam record operations are written against

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use transport::Transport;
