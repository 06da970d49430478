//! CLI argument structs for each command.

use clap::Args;
use std::path::PathBuf;

use super::types::SnapshotFormatArg;
use super::validators::{validate_label_limit, validate_title};

/// Arguments for the stats command
#[derive(Args, Debug, Clone, Default)]
pub struct StatsArgs {
    /// Read issues from this file instead of `.beads/issues.jsonl`
    #[arg(long, value_name = "FILE")]
    pub issues: Option<PathBuf>,
}

/// Arguments for the snapshot command
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// File to write
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Output format (default: from the output extension, then config)
    #[arg(short, long, value_enum)]
    pub format: Option<SnapshotFormatArg>,

    /// Heading shown in the snapshot
    #[arg(short, long, value_parser = validate_title)]
    pub title: Option<String>,

    /// Longest node label before truncation
    #[arg(long, value_parser = validate_label_limit)]
    pub max_label_chars: Option<usize>,

    /// Read issues from this file instead of `.beads/issues.jsonl`
    #[arg(long, value_name = "FILE")]
    pub issues: Option<PathBuf>,
}

/// Arguments for the sprints command
#[derive(Args, Debug, Clone, Default)]
pub struct SprintsArgs {
    /// Only show sprints whose date range includes today
    #[arg(long)]
    pub active: bool,
}
