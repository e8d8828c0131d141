//! CLI module
//!
//! Command-line interface for cursor-based record retrieval.
//!
//! # Commands
//!
//! - `records` - Fetch every record matching a query
//! - `create-cursor` - Create a cursor and print its id
//! - `fetch-cursor` - Fetch the next page of a cursor
//! - `delete-cursor` - Delete a cursor

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
