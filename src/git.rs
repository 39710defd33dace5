//! Git repository operations.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::record::LOG_FORMAT;

/// A git working tree that history is read from.
pub struct Git {
    root: PathBuf,
}

/// Filters applied to `git log`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Lower date bound, in any syntax git accepts for `--since`
    pub since: Option<String>,

    /// Upper date bound, in any syntax git accepts for `--until`
    pub until: Option<String>,

    /// Cap on the number of commits fetched (most recent first)
    pub max_count: Option<usize>,
}

impl LogQuery {
    /// Build the `git log` arguments for this query.
    ///
    /// Empty date bounds are left out entirely.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["log".to_string(), format!("--pretty=format:{LOG_FORMAT}")];

        if let Some(count) = self.max_count {
            args.push("--max-count".to_string());
            args.push(count.to_string());
        }
        for (flag, value) in [("--since", &self.since), ("--until", &self.until)] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                args.push(flag.to_string());
                args.push(value.to_string());
            }
        }

        args
    }
}

impl Git {
    /// Open the repository at `path`.
    ///
    /// Accepts a working tree or a bare repository. Fails if the path is not
    /// a directory, git does not recognize it, or it is the `.git` directory
    /// of a working tree.
    pub fn open(path: &Path) -> Result<Self, Error> {
        if !path.is_dir() {
            return Err(Error::MissingPath(path.display().to_string()));
        }

        let git = Self {
            root: path.to_path_buf(),
        };
        let not_a_repo = || Error::NotARepo(path.display().to_string());

        match git.rev_parse_flag("--is-inside-work-tree")? {
            None => return Err(not_a_repo()),
            Some(true) => {}
            // Both a bare repository and the inside of `.git` print `false`.
            Some(false) => {
                if git.rev_parse_flag("--is-bare-repository")? != Some(true) {
                    return Err(not_a_repo());
                }
            }
        }

        Ok(git)
    }

    /// Get the working tree path as given to [`Git::open`].
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run `git log` with the delimited record format, returning raw output.
    pub fn log(&self, query: &LogQuery) -> Result<String, Error> {
        let args = query.to_args();
        debug!(repo = %self.root.display(), ?args, "running git log");
        self.run_output(&args)
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    /// Ask `git rev-parse` a yes/no question.
    ///
    /// Returns `None` when git rejects the path altogether.
    fn rev_parse_flag(&self, flag: &str) -> Result<Option<bool>, Error> {
        let output = self
            .command(&["rev-parse", flag])
            .output()
            .map_err(|e| Error::Exec(format!("git rev-parse {flag}: {e}")))?;

        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim() == "true"))
    }

    fn command<S: AsRef<OsStr>>(&self, args: &[S]) -> Command {
        let mut command = Command::new("git");
        command.arg("-C").arg(&self.root).args(args);
        command
    }

    /// Run a git command and capture its stdout.
    fn run_output<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<String, Error> {
        let display = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        let output = self
            .command(args)
            .output()
            .map_err(|e| Error::Exec(format!("git {display}: {e}")))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let mut captured = String::from_utf8_lossy(&output.stderr).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stdout));
            Err(Error::Failed {
                command: format!("git {display}"),
                output: captured.trim_end().to_string(),
            })
        }
    }
}

/// Errors from git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to execute: {0}")]
    Exec(String),

    #[error("repository path does not exist: {0}")]
    MissingPath(String),

    #[error("path is not a git repository: {0}")]
    NotARepo(String),

    #[error("failed to run {command}:\n{output}")]
    Failed { command: String, output: String },
}
