//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kintone record retrieval CLI
#[derive(Parser, Debug)]
#[command(name = "kintone-sdk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON); `KINTONE_*` variables are used when omitted
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every record matching a query through a cursor
    Records {
        /// App id
        #[arg(long)]
        app: Option<i64>,

        /// Field codes to return (comma-separated, empty = all)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Query string
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Create a cursor
    CreateCursor {
        /// App id
        #[arg(long)]
        app: Option<i64>,

        /// Field codes to return (comma-separated, empty = all)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Query string
        #[arg(short, long, default_value = "")]
        query: String,

        /// Records per page
        #[arg(long)]
        size: Option<u32>,
    },

    /// Fetch the next page of a cursor
    FetchCursor {
        /// Cursor id
        #[arg(long)]
        id: String,
    },

    /// Delete a cursor
    DeleteCursor {
        /// Cursor id
        #[arg(long)]
        id: String,
    },
}
