//! # kintone SDK
//!
//! A Rust client for the kintone REST API, centred on cursor-based bulk
//! record retrieval.
//!
//! ## Features
//!
//! - **Cursor Retrieval**: Fetch every record matching a query in one call
//! - **Cursor Primitives**: Create, fetch and delete cursors directly
//! - **Structured Errors**: Server error bodies (code, message, per-field errors)
//! - **Auth Headers**: Password, API token and HTTP Basic
//! - **Guest Spaces**: Requests routed under `/k/guest/<id>/v1/`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kintone_sdk::{ClientConfig, CursorQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ClientConfig::from_env()?.record_client()?;
//!
//!     let query = CursorQuery::new(1)
//!         .fields(["Record_number", "Title"])
//!         .query("order by Record_number asc");
//!     let all = client.get_all_records_by_cursor(&query).await?;
//!
//!     println!("{} of {} records", all.records.len(), all.total_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       RecordClient                         │
//! │  get_all_records_by_cursor(query) → AllRecords             │
//! │  create_cursor / get_records_by_cursor / delete_cursor     │
//! └────────────────────────────────────────────────────────────┘
//!                              │ Transport
//! ┌──────────────┬─────────────┴──────────────┬────────────────┐
//! │    Config    │          HTTP              │      Auth      │
//! ├──────────────┼────────────────────────────┼────────────────┤
//! │ YAML / JSON  │ /k/v1/<api>.json           │ Password       │
//! │ Environment  │ Guest space paths          │ API token      │
//! │              │ Structured error bodies    │ Basic layer    │
//! └──────────────┴────────────────────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication headers
pub mod auth;

/// HTTP transport
pub mod http;

/// Cursor-based record retrieval
pub mod record;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use error::{Error, ErrorResponse, Result};
pub use record::{AllRecords, CursorHandle, CursorQuery, RecordClient, RecordPage};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
