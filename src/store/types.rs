//! Document type and store constants.

use serde::{Deserialize, Serialize};

/// Reserved database identifier for an ephemeral, in-memory store.
pub const IN_MEMORY: &str = ":memory:";

/// A document stored under a path.
///
/// Timestamps are Unix milliseconds assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Slash-separated key, unique across the store.
    pub path: String,
    /// Opaque payload. `None` only for rows written outside the store.
    pub data: Option<String>,
    /// Creation time.
    pub created: i64,
    /// Last update time.
    pub updated: i64,
}

impl Document {
    /// Create a document with explicit timestamps.
    #[must_use]
    pub fn new(path: impl Into<String>, data: Option<String>, created: i64, updated: i64) -> Self {
        Self {
            path: path.into(),
            data,
            created,
            updated,
        }
    }

    /// Whether the document has been updated since it was inserted.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.updated > self.created
    }
}
