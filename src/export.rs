//! Run one export: read history, build the document, write it out.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::ExportConfig;
use crate::document::CommitDocument;
use crate::git::{self, Git};
use crate::record::{self, CommitRecord, MalformedRecord};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of commits written
    pub count: usize,

    /// File the document was written to
    pub out: PathBuf,
}

/// Export the history selected by `config` to `config.out`.
///
/// The output file is only touched once the whole history has been read and
/// parsed, so a failed run leaves no file behind.
pub fn export(config: &ExportConfig) -> Result<ExportSummary, Error> {
    let git = Git::open(&config.repo)?;
    let raw = git.log(&config.query)?;

    let records = collect_records(&raw, config.strict)?;
    let document = CommitDocument::from_newest_first(records);
    save_document(&config.out, &document)?;

    info!(
        count = document.len(),
        repo = %git.root().display(),
        out = %config.out.display(),
        "exported commits"
    );

    Ok(ExportSummary {
        count: document.len(),
        out: config.out.clone(),
    })
}

/// Parse raw log output, skipping or rejecting malformed entries.
fn collect_records(raw: &str, strict: bool) -> Result<Vec<CommitRecord>, Error> {
    if !strict {
        return Ok(record::parse_log(raw));
    }

    record::log_entries(raw)
        .enumerate()
        .map(|(index, entry)| {
            CommitRecord::parse(entry).map_err(|reason| Error::Malformed { index, reason })
        })
        .collect()
}

fn save_document(path: &Path, document: &CommitDocument) -> Result<(), Error> {
    let content = document.to_json()?;
    std::fs::write(path, content).map_err(|e| Error::WriteOutput {
        path: path.display().to_string(),
        source: e,
    })
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during an export.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Git(#[from] git::Error),

    #[error("malformed log entry #{index}")]
    Malformed {
        index: usize,
        #[source]
        reason: MalformedRecord,
    },

    #[error("failed to serialize commits")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write output to '{path}'")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
