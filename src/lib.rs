//! Export git commit history to a JSON timeline.
//!
//! Reads `git log` for a working tree, turns each commit into a
//! `{ timestamp, title, message }` record and writes them, earliest first,
//! into a `commitObjects` array for a visualization front end to load.
//!
//! # Architecture
//!
//! - **Git**: Validate the working tree and run `git log` with a delimited format
//! - **Record**: Parse the delimited output into commit records
//! - **Document**: Order records and serialize the JSON document
//! - **Config**: Resolve flags, an optional TOML file and defaults
//! - **Export**: Tie the steps together for one run

mod config;
mod document;
mod export;
mod git;
mod record;

pub use config::{ConfigFile, DEFAULT_OUT, DEFAULT_REPO, Error as ConfigError, ExportConfig};
pub use document::CommitDocument;
pub use export::{Error, ExportSummary, export};
pub use git::{Error as GitError, Git, LogQuery};
pub use record::{
    CommitRecord, FIELD_SEP, LOG_FORMAT, MalformedRecord, RECORD_SEP, format_timestamp,
    log_entries, parse_log,
};
