//! Cursor request and response models

use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};
use serde::{Deserialize, Deserializer, Serialize};

/// Query a cursor is created over
///
/// `app` is optional at the type level so a missing app is reported as a
/// [`Error::MissingArgument`] before any request is issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorQuery {
    /// App id
    #[serde(default)]
    pub app: Option<i64>,
    /// Field codes to return (empty = all fields)
    #[serde(default)]
    pub fields: Vec<String>,
    /// Query string in the record query language
    #[serde(default)]
    pub query: String,
    /// Records per page (server default applies when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl CursorQuery {
    /// Query over every record of an app
    pub fn new(app: i64) -> Self {
        Self {
            app: Some(app),
            ..Self::default()
        }
    }

    /// Restrict returned fields
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the query string
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// The app id, or the missing argument error
    pub fn require_app(&self) -> Result<i64> {
        self.app.ok_or_else(|| Error::missing_argument("app"))
    }

    /// Request body for cursor creation
    pub(crate) fn to_body(&self) -> Result<JsonValue> {
        let mut body = serde_json::json!({
            "app": self.require_app()?,
            "fields": self.fields,
            "query": self.query,
        });
        if let Some(size) = self.size {
            body["size"] = size.into();
        }
        Ok(body)
    }
}

/// Server-side cursor created over a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorHandle {
    /// Opaque cursor id
    pub id: String,
    /// Records matched by the query when the cursor was created
    #[serde(rename = "totalCount", deserialize_with = "count_from_number_or_string")]
    pub total_count: u64,
}

/// One page fetched from a cursor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    /// Records in server order
    #[serde(default)]
    pub records: Vec<Record>,
    /// Whether more pages remain
    #[serde(default)]
    pub next: bool,
}

/// Every record retrieved through a cursor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllRecords {
    /// Records in page-arrival order
    pub records: Vec<Record>,
    /// Match count reported at cursor creation
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

// The live API reports counts as numeric strings.
fn count_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid totalCount '{s}': {e}"))),
    }
}
