//! Export settings.
//!
//! Settings come from command-line flags, an optional TOML file, and built-in
//! defaults, in that order of precedence.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::git::LogQuery;

/// Repository read when none is given.
pub const DEFAULT_REPO: &str = ".";

/// Output file written when none is given.
pub const DEFAULT_OUT: &str = "commits.json";

/// Fully resolved settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Git working tree to read
    pub repo: PathBuf,

    /// Where the JSON document is written
    pub out: PathBuf,

    /// Filters passed through to `git log`
    pub query: LogQuery,

    /// Fail on malformed log entries instead of skipping them
    pub strict: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ConfigFile::default().into_config()
    }
}

/// Partial settings, as read from a TOML file or collected from flags.
///
/// ```toml
/// repo = "../my-project"
/// out = "timeline/commits.json"
/// since = "2024-01-01"
/// max-count = 500
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub repo: Option<PathBuf>,

    #[serde(default)]
    pub out: Option<PathBuf>,

    #[serde(default)]
    pub since: Option<String>,

    #[serde(default)]
    pub until: Option<String>,

    #[serde(default)]
    pub max_count: Option<usize>,

    #[serde(default)]
    pub strict: Option<bool>,
}

impl ConfigFile {
    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse a settings file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|e| Error::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Layer `other` on top of `self`; values set in `other` win.
    #[must_use]
    pub fn overlay(self, other: ConfigFile) -> Self {
        Self {
            repo: other.repo.or(self.repo),
            out: other.out.or(self.out),
            since: other.since.or(self.since),
            until: other.until.or(self.until),
            max_count: other.max_count.or(self.max_count),
            strict: other.strict.or(self.strict),
        }
    }

    /// Fill in defaults for anything left unset.
    pub fn into_config(self) -> ExportConfig {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        ExportConfig {
            repo: self.repo.unwrap_or_else(|| PathBuf::from(DEFAULT_REPO)),
            out: self.out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT)),
            query: LogQuery {
                since: non_empty(self.since),
                until: non_empty(self.until),
                max_count: self.max_count,
            },
            strict: self.strict.unwrap_or(false),
        }
    }
}

/// Errors loading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.repo, PathBuf::from("."));
        assert_eq!(config.out, PathBuf::from("commits.json"));
        assert_eq!(config.query, LogQuery::default());
        assert!(!config.strict);
    }

    #[test]
    fn parses_kebab_case_keys() {
        let file = ConfigFile::from_toml(
            r#"
            repo = "../project"
            since = "2024-01-01"
            max-count = 20
            strict = true
            "#,
        )
        .unwrap();

        assert_eq!(file.repo, Some(PathBuf::from("../project")));
        assert_eq!(file.max_count, Some(20));
        assert_eq!(file.strict, Some(true));
        assert_eq!(file.out, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ConfigFile::from_toml("max_count = 3").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let file = ConfigFile {
            repo: Some(PathBuf::from("from-file")),
            out: Some(PathBuf::from("file.json")),
            max_count: Some(10),
            ..Default::default()
        };
        let flags = ConfigFile {
            out: Some(PathBuf::from("flag.json")),
            ..Default::default()
        };

        let config = file.overlay(flags).into_config();
        assert_eq!(config.repo, PathBuf::from("from-file"));
        assert_eq!(config.out, PathBuf::from("flag.json"));
        assert_eq!(config.query.max_count, Some(10));
    }

    #[test]
    fn empty_dates_mean_no_filter() {
        let config = ConfigFile {
            since: Some(String::new()),
            until: Some("2025-08-13".to_string()),
            ..Default::default()
        }
        .into_config();

        assert_eq!(config.query.since, None);
        assert_eq!(config.query.until.as_deref(), Some("2025-08-13"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ConfigFile::load(Path::new("/no/such/export.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
