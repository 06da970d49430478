//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::{Context, Result};
use beadview_jsonl::Warning;
use chrono::Utc;
use serde_json::json;
use std::path::Path;

use super::args::{SnapshotArgs, SprintsArgs, StatsArgs};
use super::types::SnapshotFormatArg;
use crate::analysis::analyze;
use crate::app::App;
use crate::export::{GraphSnapshotOptions, SnapshotFormat, save_graph_snapshot};
use crate::hash::compute_data_hash;
use crate::output::{self, OutputConfig, OutputMode};

/// Report skipped records on stderr without failing the command.
fn report_warnings(path: &Path, warnings: &[Warning]) -> Result<()> {
    if !warnings.is_empty() {
        output::print_warnings(path, warnings)?;
    }
    Ok(())
}

/// Pick the snapshot format: explicit flag, then output extension, then
/// the configured default.
pub(crate) fn resolve_format(
    flag: Option<SnapshotFormatArg>,
    output: &Path,
    fallback: SnapshotFormat,
) -> SnapshotFormat {
    flag.map(SnapshotFormat::from)
        .or_else(|| SnapshotFormat::from_path(output).ok())
        .unwrap_or(fallback)
}

/// Execute the stats command
pub fn execute_stats(app: &App, args: &StatsArgs, output_mode: OutputMode) -> Result<()> {
    let (path, loaded) = app
        .load_issues(args.issues.as_deref())
        .context("failed to load issues")?;
    report_warnings(&path, &loaded.warnings)?;

    let stats = analyze(&loaded.records);
    let data_hash = compute_data_hash(&loaded.records);
    output::print_stats(&stats, &data_hash, output_mode)?;
    Ok(())
}

/// Execute the snapshot command
pub fn execute_snapshot(app: &App, args: &SnapshotArgs, output_mode: OutputMode) -> Result<()> {
    let (path, loaded) = app
        .load_issues(args.issues.as_deref())
        .context("failed to load issues")?;
    report_warnings(&path, &loaded.warnings)?;

    let issues = loaded.records;
    let stats = analyze(&issues);
    let data_hash = compute_data_hash(&issues);

    let defaults = &app.config().snapshot;
    let format = resolve_format(args.format, &args.output, defaults.format);
    let title = args.title.as_deref().unwrap_or(&defaults.title);
    let max_label_chars = args.max_label_chars.unwrap_or(defaults.max_label_chars);

    let opts = GraphSnapshotOptions::new(&args.output, &issues, &stats, &data_hash)
        .with_format(format)
        .with_title(title)
        .with_max_label_chars(max_label_chars);
    save_graph_snapshot(&opts)
        .with_context(|| format!("failed to write snapshot {}", args.output.display()))?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&json!({
                "path": args.output.display().to_string(),
                "format": format.as_str(),
                "media_type": format.media_type(),
                "data_hash": data_hash,
                "issues": stats.total,
                "cycles": stats.cycles.len(),
            }))?;
        }
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            output::print_message(&format!(
                "{} {} snapshot of {} issues to {} (data hash: {})",
                output::success("Wrote", &config),
                format,
                stats.total,
                output::info(&args.output.display().to_string(), &config),
                data_hash
            ))?;
            if stats.has_cycles() {
                output::print_message(&output::warning(
                    &format!(
                        "Graph contains {} dependency cycle(s); members are highlighted",
                        stats.cycles.len()
                    ),
                    &config,
                ))?;
            }
        }
    }

    Ok(())
}

/// Execute the sprints command
pub fn execute_sprints(app: &App, args: &SprintsArgs, output_mode: OutputMode) -> Result<()> {
    let (path, loaded) = app.load_sprints().context("failed to load sprints")?;
    report_warnings(&path, &loaded.warnings)?;

    let mut sprints = loaded.records;
    if args.active {
        let now = Utc::now();
        sprints.retain(|sprint| sprint.is_active_at(now));
    }

    output::print_sprints(&sprints, output_mode)?;
    Ok(())
}
