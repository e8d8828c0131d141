//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::Transport;
use crate::record::{CursorQuery, RecordClient};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the client configuration from `--config` or the environment
    pub fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => ClientConfig::from_file(path),
            None => ClientConfig::from_env(),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.load_config()?.record_client()?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(&client, &mut out).await
    }

    /// Run the command against a record client, writing JSON to `out`
    pub async fn execute<T, W>(&self, client: &RecordClient<T>, out: &mut W) -> Result<()>
    where
        T: Transport,
        W: Write,
    {
        match &self.cli.command {
            Commands::Records { app, fields, query } => {
                let query = CursorQuery {
                    app: *app,
                    fields: fields.clone(),
                    query: query.clone(),
                    size: None,
                };
                let result = client.get_all_records_by_cursor(&query).await?;
                self.emit(out, &result)
            }
            Commands::CreateCursor {
                app,
                fields,
                query,
                size,
            } => {
                let query = CursorQuery {
                    app: *app,
                    fields: fields.clone(),
                    query: query.clone(),
                    size: *size,
                };
                let handle = client.create_cursor(&query).await?;
                self.emit(out, &handle)
            }
            Commands::FetchCursor { id } => {
                let page = client.get_records_by_cursor(id).await?;
                self.emit(out, &page)
            }
            Commands::DeleteCursor { id } => {
                client.delete_cursor(id).await?;
                self.emit(out, &json!({}))
            }
        }
    }

    fn emit<W: Write, S: Serialize>(&self, out: &mut W, value: &S) -> Result<()> {
        if self.cli.pretty {
            serde_json::to_writer_pretty(&mut *out, value)?;
        } else {
            serde_json::to_writer(&mut *out, value)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
