//! Authentication module
//!
//! Supports: password authentication, API tokens, and an optional
//! HTTP Basic layer on top of either.
//!
//! The `Authenticator` only builds request headers; choosing a scheme is
//! left to the caller's configuration.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, API_TOKEN_HEADER, PASSWORD_AUTH_HEADER};
pub use types::{AuthConfig, BasicAuth};
