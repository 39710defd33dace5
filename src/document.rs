//! The exported JSON document.
//!
//! The visualization reads a single object whose `commitObjects` array holds
//! the commits from earliest to latest.

use serde::{Deserialize, Serialize};

use crate::record::CommitRecord;

/// Top-level output document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDocument {
    /// Commits ordered earliest to latest
    pub commit_objects: Vec<CommitRecord>,
}

impl CommitDocument {
    /// Build a document from records in `git log` order (newest first).
    pub fn from_newest_first(mut records: Vec<CommitRecord>) -> Self {
        records.reverse();
        Self {
            commit_objects: records,
        }
    }

    /// Number of commits in the document.
    pub fn len(&self) -> usize {
        self.commit_objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commit_objects.is_empty()
    }

    /// Serialize as two-space indented JSON with non-ASCII text left as is.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a previously exported document, ignoring a leading BOM.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text.strip_prefix('\u{feff}').unwrap_or(text))
    }
}
