//! Throwaway git repositories with deterministic commit dates.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Whether a `git` binary can be run. Tests that need one return early
/// when it is missing.
pub fn git_available() -> bool {
    let found = Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !found {
        eprintln!("git not found, skipping");
    }
    found
}

/// A git command isolated from the user's and system configuration.
fn git_command(dir: &Path) -> Command {
    let mut command = Command::new("git");
    command
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_AUTHOR_NAME", "Test Author")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_COMMITTER_NAME", "Test Author")
        .env("GIT_COMMITTER_EMAIL", "author@example.com")
        .args(["-c", "commit.gpgsign=false"]);
    command
}

/// A temporary git repository, removed when dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create an empty repository (no commits yet).
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo
    }

    /// Get the path to the working tree.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Run a git command in this repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = git_command(self.dir.path())
            .args(args)
            .output()
            .expect("Failed to execute git");

        if !output.status.success() {
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Clone this repository into `dest` as a bare repository.
    pub fn clone_bare(&self, dest: &Path) {
        let dest = dest.to_str().expect("temp paths are UTF-8");
        self.git(&["clone", "-q", "--bare", ".", dest]);
    }

    /// Record an empty commit whose author and committer time is `unix_seconds`.
    pub fn commit_at(&self, unix_seconds: i64, title: &str, body: &str) {
        let date = format!("@{unix_seconds} +0000");
        let mut command = git_command(self.dir.path());
        command
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .args(["commit", "-q", "--allow-empty", "-m", title]);
        if !body.is_empty() {
            command.args(["-m", body]);
        }

        let output = command.output().expect("Failed to execute git commit");
        assert!(
            output.status.success(),
            "git commit failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
