//! Core domain types for blockport import runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version for the import manifest format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// JobId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for import job identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Generate a new time-sortable job identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// ImportManifest
// ---------------------------------------------------------------------------

/// The `manifest.json` structure stored at the root of each import output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportManifest {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Unique identifier for this import run.
    pub id: JobId,
    /// Site profile used for the run.
    pub profile: String,
    /// Origin of the legacy site the pages were fetched from.
    pub source_origin: String,
    /// Tool version that produced this output.
    pub tool_version: String,
    /// When the run started.
    pub created_at: DateTime<Utc>,
    /// Number of pages written.
    pub page_count: usize,
}

// ---------------------------------------------------------------------------
// PageRecord
// ---------------------------------------------------------------------------

/// Record of a single imported page, written to `pages.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Unique page identifier (UUID v7).
    pub id: String,
    /// Owning import job.
    pub job_id: String,
    /// Original page URL.
    pub url: String,
    /// Derived document path (e.g. `stories/some-article`).
    pub path: String,
    /// Page title from the extracted metadata, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// SHA-256 hash of the transformed output.
    pub content_hash: String,
    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
    /// HTTP status code from fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Fetched body length in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_len: Option<usize>,
}
