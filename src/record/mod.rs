//! Record module
//!
//! Cursor-based bulk record retrieval.
//!
//! # Overview
//!
//! The REST API exposes three cursor primitives: create a server-side cursor
//! over a query, fetch the next page from it, and delete it. `RecordClient`
//! exposes each primitive and composes them into
//! [`RecordClient::get_all_records_by_cursor`], which accumulates every page
//! into one result and releases the cursor when retrieval ends early or fails.

mod cursor;
mod types;

pub use cursor::{RecordClient, CURSOR_API};
pub use types::{AllRecords, CursorHandle, CursorQuery, RecordPage};
