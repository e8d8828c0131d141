//! Transport abstraction
//!
//! Record operations only need "issue a request against a named API and get
//! parsed JSON back, or a structured error". `HttpClient` is the production
//! implementation.

use super::client::RequestConfig;
use crate::error::Result;
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use std::sync::Arc;

/// Issues requests against named REST APIs (e.g. `records/cursor`)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and decode the JSON response body
    ///
    /// Non-2xx responses must be reported as [`crate::Error::Api`].
    async fn send(&self, method: Method, api: &str, config: RequestConfig) -> Result<JsonValue>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, method: Method, api: &str, config: RequestConfig) -> Result<JsonValue> {
        (**self).send(method, api, config).await
    }
}

