//! Parsing of delimited `git log` output into commit records.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Separates the fields of one log entry (ASCII unit separator).
pub const FIELD_SEP: char = '\u{1f}';

/// Terminates each log entry (ASCII record separator).
pub const RECORD_SEP: char = '\u{1e}';

/// `--pretty=format:` string: committer timestamp, subject, body.
///
/// Git expands `%x1f` and `%x1e` to [`FIELD_SEP`] and [`RECORD_SEP`], which
/// keeps the command line itself printable.
pub const LOG_FORMAT: &str = "%ct%x1f%s%x1f%b%x1e";

/// A single exported commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit time as ISO-8601 UTC, e.g. `2023-11-14T22:13:20Z`
    pub timestamp: String,

    /// Subject line, trimmed
    pub title: String,

    /// Body with LF line endings and no trailing whitespace
    pub message: String,
}

/// Why a log entry could not be turned into a [`CommitRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRecord {
    #[error("expected 3 fields, found {0}")]
    MissingFields(usize),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

impl CommitRecord {
    /// Parse one log entry (the text between two record separators).
    ///
    /// Fields beyond the third are ignored.
    pub fn parse(entry: &str) -> Result<Self, MalformedRecord> {
        let fields: Vec<&str> = entry.split(FIELD_SEP).collect();
        let [timestamp, title, body, ..] = fields.as_slice() else {
            return Err(MalformedRecord::MissingFields(fields.len()));
        };

        // Entries after the first are preceded by the newline git emits between them.
        let timestamp = timestamp.trim();
        let seconds: i64 = timestamp
            .parse()
            .map_err(|_| MalformedRecord::InvalidTimestamp(timestamp.to_string()))?;

        Ok(Self {
            timestamp: format_timestamp(seconds)?,
            title: title.trim().to_string(),
            message: normalize_message(body),
        })
    }
}

/// Format Unix seconds as ISO-8601 UTC with a `Z` suffix.
pub fn format_timestamp(seconds: i64) -> Result<String, MalformedRecord> {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .ok_or(MalformedRecord::TimestampOutOfRange(seconds))
}

fn normalize_message(body: &str) -> String {
    body.replace("\r\n", "\n").trim_end().to_string()
}

/// Split raw log output into entries, dropping blank chunks.
pub fn log_entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(RECORD_SEP).filter(|entry| !entry.trim().is_empty())
}

/// Parse raw log output, silently skipping malformed entries.
///
/// Records come back in the order git printed them (newest first).
pub fn parse_log(raw: &str) -> Vec<CommitRecord> {
    log_entries(raw)
        .enumerate()
        .filter_map(|(index, entry)| match CommitRecord::parse(entry) {
            Ok(record) => Some(record),
            Err(reason) => {
                debug!(index, %reason, "skipping malformed log entry");
                None
            }
        })
        .collect()
}
