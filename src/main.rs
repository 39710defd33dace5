use std::path::PathBuf;

use clap::Parser;
use git_commit_export::{ConfigFile, ExportConfig};
use tracing::Level;

#[derive(Parser)]
#[command(name = "git-commit-export")]
#[command(about = "Export git commits (timestamp, title, message) to JSON, earliest first")]
struct Cli {
    /// Path to the git working tree (default: .)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Output JSON file path (default: commits.json)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Only include commits after this date/time (e.g. "2024-01-01")
    #[arg(long)]
    since: Option<String>,

    /// Only include commits before this date/time (e.g. "2025-08-13")
    #[arg(long)]
    until: Option<String>,

    /// Limit to the N most recent commits
    #[arg(long, value_name = "N")]
    max_count: Option<usize>,

    /// TOML file with defaults for the options above
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail on malformed log entries instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve(self) -> anyhow::Result<ExportConfig> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let flags = ConfigFile {
            repo: self.repo,
            out: self.out,
            since: self.since,
            until: self.until,
            max_count: self.max_count,
            strict: self.strict.then_some(true),
        };

        Ok(file.overlay(flags).into_config())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let config = cli.resolve()?;
    let summary = git_commit_export::export(&config)?;

    println!(
        "Wrote {} commits (earliest to latest) inside 'commitObjects' to {}",
        summary.count,
        summary.out.display()
    );

    Ok(())
}
