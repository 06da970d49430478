//! Graph snapshot export.
//!
//! A snapshot is a single file capturing the dependency graph of an issue
//! collection together with its [`Stats`] and [`DataHash`]. Rendering is
//! split in two:
//!
//! - [`Snapshot::build`] lays out the graph and gathers everything an
//!   encoder needs, independent of the output format
//! - an [`Encoder`], selected with [`encoder_for`], serializes the snapshot
//!   and owns the escaping rules of its syntax
//!
//! [`save_graph_snapshot`] renders fully in memory and then writes through
//! [`beadview_jsonl::write_atomic`], so a failed export never leaves a
//! partial file at the target path.
//!
//! # Example
//!
//! ```no_run
//! use beadview::analysis::analyze;
//! use beadview::export::{save_graph_snapshot, GraphSnapshotOptions};
//! use beadview::hash::compute_data_hash;
//! use beadview::store::load_issues;
//! use std::path::Path;
//!
//! # fn main() -> beadview::error::Result<()> {
//! let issues = load_issues(Path::new("."))?.records;
//! let stats = analyze(&issues);
//! let hash = compute_data_hash(&issues);
//!
//! let opts = GraphSnapshotOptions::new(Path::new("graph.svg"), &issues, &stats, &hash);
//! save_graph_snapshot(&opts)?;
//! # Ok(())
//! # }
//! ```

pub mod dot;
pub mod json;
pub mod layout;
pub mod svg;

use crate::analysis::{DependencyGraph, Stats, distinct_issues};
use crate::domain::{DependencyType, Issue, IssueId, IssueStatus};
use crate::error::{Error, Result};
use crate::hash::DataHash;
use layout::{Layout, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "Dependency graph";

/// Default limit on node label length, in characters.
pub const DEFAULT_MAX_LABEL_CHARS: usize = 32;

/// Supported snapshot output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Scalable Vector Graphics image
    Svg,
    /// Structured JSON document
    Json,
    /// Graphviz DOT source
    Dot,
}

impl SnapshotFormat {
    /// Every supported format.
    pub const ALL: [SnapshotFormat; 3] = [
        SnapshotFormat::Svg,
        SnapshotFormat::Json,
        SnapshotFormat::Dot,
    ];

    /// The format's tag, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotFormat::Svg => "svg",
            SnapshotFormat::Json => "json",
            SnapshotFormat::Dot => "dot",
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// IANA media type of the encoded artifact.
    #[must_use]
    pub fn media_type(self) -> &'static str {
        match self {
            SnapshotFormat::Svg => "image/svg+xml",
            SnapshotFormat::Json => "application/json",
            SnapshotFormat::Dot => "text/vnd.graphviz",
        }
    }

    /// Infer the format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedFormat` if the extension is missing or is
    /// not a supported tag.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        ext.parse()
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnapshotFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| Error::UnsupportedFormat {
                tag: tag.to_string(),
                supported: Self::supported_list(),
            })
    }
}

/// Everything needed to export one snapshot.
///
/// Built per export and consumed by [`save_graph_snapshot`] or
/// [`render_snapshot`].
#[derive(Debug, Clone, Copy)]
pub struct GraphSnapshotOptions<'a> {
    /// Output file
    pub path: &'a Path,
    /// Output format; inferred from the path's extension when `None`
    pub format: Option<SnapshotFormat>,
    /// Issues to draw
    pub issues: &'a [Issue],
    /// Statistics precomputed from `issues`
    pub stats: &'a Stats,
    /// Fingerprint of `issues`, embedded in the artifact
    pub data_hash: &'a DataHash,
    /// Heading shown in the artifact
    pub title: &'a str,
    /// Longest node label before truncation
    pub max_label_chars: usize,
}

impl<'a> GraphSnapshotOptions<'a> {
    /// Options with the default title and label limit, format taken from
    /// the path.
    #[must_use]
    pub fn new(
        path: &'a Path,
        issues: &'a [Issue],
        stats: &'a Stats,
        data_hash: &'a DataHash,
    ) -> Self {
        Self {
            path,
            format: None,
            issues,
            stats,
            data_hash,
            title: DEFAULT_TITLE,
            max_label_chars: DEFAULT_MAX_LABEL_CHARS,
        }
    }

    /// Set an explicit output format.
    #[must_use]
    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the heading.
    #[must_use]
    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set the label truncation limit.
    #[must_use]
    pub fn with_max_label_chars(mut self, max: usize) -> Self {
        self.max_label_chars = max;
        self
    }

    /// The explicit format, or the one implied by the path.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedFormat` when no format was set and the
    /// path's extension is not a supported tag.
    pub fn resolve_format(&self) -> Result<SnapshotFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => SnapshotFormat::from_path(self.path),
        }
    }
}

/// A placed issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotNode<'a> {
    /// Issue ID
    pub id: &'a IssueId,
    /// Full, unescaped title
    pub title: &'a str,
    /// Issue status
    pub status: IssueStatus,
    /// Row in the layout
    pub level: usize,
    /// Top-left corner of the node box
    pub position: Position,
    /// Member of a dependency cycle
    pub in_cycle: bool,
    /// Waiting on an unfinished dependency
    pub blocked: bool,
}

/// A dependency edge between two placed issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEdge {
    /// Dependent issue
    pub from: IssueId,
    /// Issue depended on
    pub to: IssueId,
    /// Kind of dependency
    pub dep_type: DependencyType,
}

/// Format-independent view of the graph handed to an [`Encoder`].
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    /// Heading
    pub title: &'a str,
    /// Fingerprint of the issue set
    pub data_hash: &'a DataHash,
    /// Summary statistics
    pub stats: &'a Stats,
    /// Nodes sorted by ID
    pub nodes: Vec<SnapshotNode<'a>>,
    /// Edges in deterministic order
    pub edges: Vec<SnapshotEdge>,
    /// Canvas size and node placement
    pub layout: Layout,
    /// Longest node label before truncation
    pub max_label_chars: usize,
}

impl<'a> Snapshot<'a> {
    /// Lay out the graph described by `opts`.
    #[must_use]
    pub fn build(opts: &GraphSnapshotOptions<'a>) -> Self {
        let graph = DependencyGraph::build(opts.issues);
        let layout = Layout::compute(&graph);
        let levels = graph.levels();
        let in_cycle: BTreeSet<IssueId> = opts.stats.cycle_members();

        let nodes = distinct_issues(opts.issues)
            .into_iter()
            .filter_map(|issue| {
                let position = layout.position(&issue.id)?;
                Some(SnapshotNode {
                    id: &issue.id,
                    title: &issue.title,
                    status: issue.status,
                    level: levels.get(&issue.id).copied().unwrap_or(0),
                    position,
                    in_cycle: in_cycle.contains(&issue.id),
                    blocked: opts.stats.is_blocked(&issue.id),
                })
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(from, to, dep_type)| SnapshotEdge {
                from: from.clone(),
                to: to.clone(),
                dep_type,
            })
            .collect();

        Self {
            title: opts.title,
            data_hash: opts.data_hash,
            stats: opts.stats,
            nodes,
            edges,
            layout,
            max_label_chars: opts.max_label_chars,
        }
    }

    /// Look up a node by ID.
    #[must_use]
    pub fn node(&self, id: &IssueId) -> Option<&SnapshotNode<'a>> {
        self.nodes
            .binary_search_by(|n| n.id.cmp(id))
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// `title` shortened to the label limit, with an ellipsis when cut.
    #[must_use]
    pub fn label(&self, title: &str) -> String {
        truncate_label(title, self.max_label_chars)
    }
}

/// Shorten `text` to at most `max` characters, ending in `…` when cut.
#[must_use]
pub fn truncate_label(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Serializes a [`Snapshot`] in one output format.
pub trait Encoder {
    /// Format produced by this encoder.
    fn format(&self) -> SnapshotFormat;

    /// Write the encoded snapshot to `out`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Encode` if serialization or writing fails.
    fn encode(&self, snapshot: &Snapshot<'_>, out: &mut dyn Write) -> Result<()>;
}

/// The encoder registered for `format`.
#[must_use]
pub fn encoder_for(format: SnapshotFormat) -> &'static dyn Encoder {
    match format {
        SnapshotFormat::Svg => &svg::SvgEncoder,
        SnapshotFormat::Json => &json::JsonEncoder,
        SnapshotFormat::Dot => &dot::DotEncoder,
    }
}

/// Map a failure inside an encoder to `Error::Encode`.
pub(crate) fn encode_error(format: SnapshotFormat, err: impl fmt::Display) -> Error {
    Error::Encode {
        format: format.as_str(),
        message: err.to_string(),
    }
}

/// Render the snapshot described by `opts` into memory.
///
/// # Errors
///
/// Returns `Error::UnsupportedFormat` if the format cannot be resolved, or
/// `Error::Encode` if the encoder fails.
pub fn render_snapshot(opts: &GraphSnapshotOptions<'_>) -> Result<Vec<u8>> {
    let format = opts.resolve_format()?;
    let snapshot = Snapshot::build(opts);

    let mut buf = Vec::new();
    encoder_for(format).encode(&snapshot, &mut buf)?;
    Ok(buf)
}

/// Render the snapshot described by `opts` and atomically write it to
/// `opts.path`.
///
/// Nothing is written unless rendering succeeds, and the target is replaced
/// in one rename, so the path holds either its previous content or the
/// complete new snapshot.
///
/// # Errors
///
/// Returns `Error::UnsupportedFormat` or `Error::Encode` from rendering, or
/// `Error::Store` if the file cannot be written.
pub fn save_graph_snapshot(opts: &GraphSnapshotOptions<'_>) -> Result<()> {
    let bytes = render_snapshot(opts)?;

    beadview_jsonl::write_atomic(opts.path, |w| {
        w.write_all(&bytes)?;
        Ok(())
    })
    .map_err(|e| Error::store(opts.path, e))?;

    info!(
        path = %opts.path.display(),
        bytes = bytes.len(),
        data_hash = %opts.data_hash,
        "Saved graph snapshot"
    );
    Ok(())
}
