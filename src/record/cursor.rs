//! Cursor primitives and the bulk retrieval built on them

use super::types::{AllRecords, CursorHandle, CursorQuery, RecordPage};
use crate::error::{Error, Result};
use crate::http::{RequestConfig, Transport};
use crate::types::{JsonValue, Method, Record};
use serde_json::json;
use tracing::{debug, info, warn};

/// API name of the cursor endpoint
pub const CURSOR_API: &str = "records/cursor";

/// Stage of a bulk retrieval
///
/// ```text
/// Init --(valid)--> Creating --(created)--> Fetching --(next=false)--> Done
///   |                  |                      |  ^
///   |                  |                      +--+ (next=true)
///   v                  v                      v
/// Failed <---------- Failed <--(delete)--- Cleanup (fetch failed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CursorPhase {
    /// Query not yet validated
    Init,
    /// Create request in flight
    Creating,
    /// Pulling pages
    Fetching,
    /// Releasing the cursor after a failed fetch
    Cleanup,
    /// All pages retrieved
    Done,
    /// Terminal failure
    Failed,
}

impl CursorPhase {
    /// Whether this phase ends the retrieval
    pub(crate) fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Accumulator for a single retrieval
#[derive(Debug)]
struct CursorRun {
    phase: CursorPhase,
    handle: Option<CursorHandle>,
    records: Vec<Record>,
    pages: usize,
}

impl CursorRun {
    fn new() -> Self {
        Self {
            phase: CursorPhase::Init,
            handle: None,
            records: Vec::new(),
            pages: 0,
        }
    }

    fn transition(&mut self, phase: CursorPhase) {
        debug_assert!(
            !self.phase.is_terminal(),
            "no transition out of {:?}",
            self.phase
        );
        debug!("cursor phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn created(&mut self, handle: CursorHandle) {
        self.handle = Some(handle);
        self.transition(CursorPhase::Fetching);
    }

    /// Append a page; returns whether another fetch should follow
    fn push(&mut self, page: RecordPage) -> bool {
        self.pages += 1;
        debug!(
            "cursor page {}: {} records, next={}",
            self.pages,
            page.records.len(),
            page.next
        );
        self.records.extend(page.records);
        page.next
    }

    fn total_count(&self) -> u64 {
        self.handle.as_ref().map_or(0, |h| h.total_count)
    }

    /// Pages ran out before the creation-time match count was reached
    fn stopped_early(&self) -> bool {
        (self.records.len() as u64) < self.total_count()
    }

    fn finish(mut self) -> AllRecords {
        self.transition(CursorPhase::Done);
        AllRecords {
            total_count: self.total_count(),
            records: self.records,
        }
    }
}

/// Record operations over a transport
#[derive(Debug, Clone)]
pub struct RecordClient<T> {
    transport: T,
}

impl<T: Transport> RecordClient<T> {
    /// Create a record client
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Create a cursor over a query
    ///
    /// A cursor the server created but whose handle cannot be decoded is
    /// deleted before the decode error is returned.
    pub async fn create_cursor(&self, query: &CursorQuery) -> Result<CursorHandle> {
        let body = query.to_body()?;
        let response = self
            .transport
            .send(Method::POST, CURSOR_API, RequestConfig::new().json(body))
            .await?;

        let cursor_id = match response.get("id") {
            Some(JsonValue::String(id)) => id.clone(),
            Some(JsonValue::Number(id)) => id.to_string(),
            _ => String::new(),
        };
        if cursor_id.is_empty() {
            return Err(Error::decode("cursor create response has no id"));
        }

        let handle: CursorHandle = match serde_json::from_value(response) {
            Ok(handle) => handle,
            Err(err) => {
                self.release(&cursor_id).await;
                return Err(Error::decode(format!("invalid cursor {cursor_id}: {err}")));
            }
        };
        debug!(
            "created cursor {} over {} records",
            handle.id, handle.total_count
        );
        Ok(handle)
    }

    /// Fetch the next page from a cursor
    pub async fn get_records_by_cursor(&self, cursor_id: &str) -> Result<RecordPage> {
        if cursor_id.is_empty() {
            return Err(Error::missing_argument("id"));
        }
        let response = self
            .transport
            .send(
                Method::GET,
                CURSOR_API,
                RequestConfig::new().query("id", cursor_id),
            )
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Delete a cursor
    pub async fn delete_cursor(&self, cursor_id: &str) -> Result<()> {
        if cursor_id.is_empty() {
            return Err(Error::missing_argument("id"));
        }
        self.transport
            .send(
                Method::DELETE,
                CURSOR_API,
                RequestConfig::new().json(json!({ "id": cursor_id })),
            )
            .await?;
        debug!("deleted cursor {}", cursor_id);
        Ok(())
    }

    /// Retrieve every record matching a query through a cursor
    ///
    /// Pages are fetched sequentially and appended in arrival order. The
    /// cursor is deleted when a fetch fails or when the pages end before
    /// `totalCount` records were seen; that delete is best-effort and its
    /// outcome never replaces the result or error returned here.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingArgument`] when `query.app` is unset (no request is sent)
    /// - [`Error::Api`] when creating the cursor or fetching a page fails
    pub async fn get_all_records_by_cursor(&self, query: &CursorQuery) -> Result<AllRecords> {
        let mut run = CursorRun::new();

        let app = match query.require_app() {
            Ok(app) => app,
            Err(err) => {
                run.transition(CursorPhase::Failed);
                return Err(err);
            }
        };

        run.transition(CursorPhase::Creating);
        let handle = match self.create_cursor(query).await {
            Ok(handle) => handle,
            Err(err) => {
                run.transition(CursorPhase::Failed);
                return Err(err);
            }
        };
        let cursor_id = handle.id.clone();
        run.created(handle);

        loop {
            match self.get_records_by_cursor(&cursor_id).await {
                Ok(page) => {
                    if !run.push(page) {
                        break;
                    }
                }
                Err(err) => {
                    run.transition(CursorPhase::Cleanup);
                    self.release(&cursor_id).await;
                    run.transition(CursorPhase::Failed);
                    return Err(err);
                }
            }
        }

        if run.stopped_early() {
            debug!(
                "cursor {} ended after {} of {} records",
                cursor_id,
                run.records.len(),
                run.total_count()
            );
            self.release(&cursor_id).await;
        }

        let result = run.finish();
        info!(
            "retrieved {} records from app {} (totalCount {})",
            result.records.len(),
            app,
            result.total_count
        );
        Ok(result)
    }

    /// Best-effort delete; failures are logged and dropped
    async fn release(&self, cursor_id: &str) {
        if let Err(err) = self.delete_cursor(cursor_id).await {
            warn!("failed to delete cursor {}: {}", cursor_id, err);
        }
    }
}
