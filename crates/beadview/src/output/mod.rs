//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use. Every
//! text formatter writes to a generic `Write` so it can be tested against a
//! buffer; the `print_*` functions bind them to stdout or stderr.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers

pub mod color;

use crate::analysis::Stats;
use crate::domain::{IssueStatus, Sprint};
use crate::hash::DataHash;
use beadview_jsonl::Warning;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::Path;

pub use color::{error, info, success, warning};

use color::{bold, colorize_status, dimmed};

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `BEADVIEW_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var_os("NO_COLOR").is_none()
            && env::var("BEADVIEW_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// JSON shape of the `stats` command.
#[derive(Debug, Serialize)]
pub struct StatsReport<'a> {
    /// Fingerprint of the analyzed issues
    pub data_hash: &'a DataHash,
    /// The analysis
    pub stats: &'a Stats,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print analysis results in the specified format
pub fn print_stats(stats: &Stats, data_hash: &DataHash, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => {
            write_stats_text(&mut handle, stats, data_hash, &OutputConfig::from_env())
        }
        OutputMode::Json => write_json(&mut handle, &StatsReport { data_hash, stats }),
    }
}

/// Print sprints in the specified format
pub fn print_sprints(sprints: &[Sprint], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => {
            write_sprints_text(&mut handle, sprints, Utc::now(), &OutputConfig::from_env())
        }
        OutputMode::Json => write_json(&mut handle, &sprints),
    }
}

/// Print load diagnostics for `path` to stderr
pub fn print_warnings(path: &Path, warnings: &[Warning]) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    write_warnings(&mut handle, path, warnings, &OutputConfig::from_env())
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

// ============================================================================
// Formatting
// ============================================================================

/// Write `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn join_ids<T: std::fmt::Display>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write a human-readable analysis summary.
pub fn write_stats_text<W: Write>(
    w: &mut W,
    stats: &Stats,
    data_hash: &DataHash,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}  {}",
        bold("Issues:", config),
        stats.total,
        dimmed(&format!("(data hash: {data_hash})"), config)
    )?;
    for status in IssueStatus::ALL {
        writeln!(
            w,
            "  {} {}",
            colorize_status(status, 12, config),
            stats.count(status)
        )?;
    }
    writeln!(
        w,
        "{} {} edges, max depth {}",
        bold("Dependencies:", config),
        stats.edge_count,
        stats.max_depth
    )?;

    if !stats.blocked.is_empty() {
        writeln!(
            w,
            "{} {}",
            error(&format!("Blocked ({}):", stats.blocked.len()), config),
            join_ids(&stats.blocked)
        )?;
        writeln!(
            w,
            "{} {}",
            bold(&format!("Blockers ({}):", stats.blockers.len()), config),
            join_ids(&stats.blockers)
        )?;
    }

    if stats.has_cycles() {
        writeln!(
            w,
            "{}",
            error(&format!("Cycles ({}):", stats.cycles.len()), config)
        )?;
        for cycle in &stats.cycles {
            writeln!(w, "  {}", join_ids(cycle))?;
        }
    }

    if !stats.dangling.is_empty() {
        writeln!(
            w,
            "{}",
            warning(
                &format!("Dangling references ({}):", stats.dangling.len()),
                config
            )
        )?;
        for dangling in &stats.dangling {
            writeln!(w, "  {} -> {}", dangling.from, dangling.to)?;
        }
    }

    if !stats.duplicate_ids.is_empty() {
        writeln!(
            w,
            "{} {}",
            warning(
                &format!("Duplicate IDs ({}):", stats.duplicate_ids.len()),
                config
            ),
            join_ids(&stats.duplicate_ids)
        )?;
    }

    Ok(())
}

/// Write one line per sprint.
pub fn write_sprints_text<W: Write>(
    w: &mut W,
    sprints: &[Sprint],
    now: DateTime<Utc>,
    config: &OutputConfig,
) -> io::Result<()> {
    if sprints.is_empty() {
        return writeln!(w, "No sprints found.");
    }

    let date = |d: Option<DateTime<Utc>>| {
        d.map_or_else(|| "?".to_string(), |d| d.format("%Y-%m-%d").to_string())
    };

    for sprint in sprints {
        let active = if sprint.is_active_at(now) {
            format!(" {}", success("[active]", config))
        } else {
            String::new()
        };
        writeln!(
            w,
            "{} {} {} ({} issues){active}",
            info(&sprint.id, config),
            sprint.name,
            dimmed(
                &format!("{}..{}", date(sprint.start_date), date(sprint.end_date)),
                config
            ),
            sprint.bead_ids.len()
        )?;
    }
    Ok(())
}

/// Write one line per skipped record.
pub fn write_warnings<W: Write>(
    w: &mut W,
    path: &Path,
    warnings: &[Warning],
    config: &OutputConfig,
) -> io::Result<()> {
    for warning_item in warnings {
        writeln!(
            w,
            "{} {}: {}",
            warning("warning:", config),
            path.display(),
            warning_item.description()
        )?;
    }
    Ok(())
}
