//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for beadview using clap's derive API.
//!
//! # Commands
//!
//! - `stats`: Analyze the issue graph and print a summary
//! - `snapshot`: Render the issue graph to an SVG, JSON, or DOT file
//! - `sprints`: List sprints
//!
//! # Global Flags
//!
//! - `--repo`: Repository containing the `.beads/` directory (default: `.`)
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--verbose`: Enable debug logging
//!
//! # Example
//!
//! ```bash
//! beadview stats
//! beadview --repo ../project snapshot --output graph.svg
//! beadview snapshot -o graph.gv --format dot --title "Release 2.0"
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Re-export argument structs
pub use args::{SnapshotArgs, SprintsArgs, StatsArgs};

// Re-export types
pub use types::SnapshotFormatArg;

// Re-export validators for external use
pub use validators::{validate_label_limit, validate_title};

/// Beadview - dependency graph viewer for beads issue trackers
///
/// Reads issues from `.beads/issues.jsonl`, analyzes their dependencies,
/// and renders shareable graph snapshots.
#[derive(Parser, Debug)]
#[command(name = "beadview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository containing the `.beads/` directory
    #[arg(long, global = true, default_value = ".", value_name = "PATH")]
    pub repo: PathBuf,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show dependency statistics
    ///
    /// Prints per-status counts, blocked issues and their blockers, and any
    /// cycles, dangling references, or duplicate IDs found in the graph.
    Stats(StatsArgs),

    /// Render a dependency graph snapshot
    ///
    /// Writes the graph and its statistics to a single file. The format is
    /// taken from `--format`, then the output extension, then the viewer
    /// config. The file is replaced atomically.
    Snapshot(SnapshotArgs),

    /// List sprints
    ///
    /// Shows every valid sprint from `.beads/sprints.jsonl`. Invalid records
    /// are skipped with a warning.
    Sprints(SprintsArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Execute the parsed command
    ///
    /// # Errors
    ///
    /// Returns an error if the repository's config or collections cannot
    /// be read, or if a snapshot cannot be written.
    pub fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let app = App::open(&self.repo)
            .with_context(|| format!("failed to open repository {}", self.repo.display()))?;

        match &self.command {
            Commands::Stats(args) => execute::execute_stats(&app, args, output_mode),
            Commands::Snapshot(args) => execute::execute_snapshot(&app, args, output_mode),
            Commands::Sprints(args) => execute::execute_sprints(&app, args, output_mode),
        }
    }
}
