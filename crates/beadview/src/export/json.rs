//! JSON encoder.
//!
//! The document is a [`SnapshotDocument`]; it deserializes back into the
//! same type, so downstream tools can consume snapshots with serde.

use super::{Encoder, Snapshot, SnapshotFormat, encode_error};
use crate::analysis::Stats;
use crate::domain::{DependencyType, IssueId, IssueStatus};
use crate::error::Result;
use crate::hash::DataHash;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Version of the document layout.
pub const DOCUMENT_VERSION: u32 = 1;

/// Top-level JSON snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Document layout version
    pub version: u32,
    /// Heading
    pub title: String,
    /// Fingerprint of the issue set
    pub data_hash: DataHash,
    /// Summary statistics
    pub stats: Stats,
    /// Placed issues, sorted by ID
    pub nodes: Vec<DocumentNode>,
    /// Dependency edges
    pub edges: Vec<DocumentEdge>,
}

/// A placed issue in a [`SnapshotDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Issue ID
    pub id: IssueId,
    /// Full title
    pub title: String,
    /// Issue status
    pub status: IssueStatus,
    /// Layout row
    pub level: usize,
    /// Horizontal position
    pub x: u32,
    /// Vertical position
    pub y: u32,
    /// Member of a dependency cycle
    pub in_cycle: bool,
    /// Waiting on an unfinished dependency
    pub blocked: bool,
}

/// A dependency edge in a [`SnapshotDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEdge {
    /// Dependent issue
    pub from: IssueId,
    /// Issue depended on
    pub to: IssueId,
    /// Kind of dependency
    #[serde(rename = "type")]
    pub dep_type: DependencyType,
}

impl SnapshotDocument {
    /// Owned document for `snapshot`.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot<'_>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            title: snapshot.title.to_string(),
            data_hash: snapshot.data_hash.clone(),
            stats: snapshot.stats.clone(),
            nodes: snapshot
                .nodes
                .iter()
                .map(|node| DocumentNode {
                    id: node.id.clone(),
                    title: node.title.to_string(),
                    status: node.status,
                    level: node.level,
                    x: node.position.x,
                    y: node.position.y,
                    in_cycle: node.in_cycle,
                    blocked: node.blocked,
                })
                .collect(),
            edges: snapshot
                .edges
                .iter()
                .map(|edge| DocumentEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    dep_type: edge.dep_type,
                })
                .collect(),
        }
    }
}

/// Encoder for [`SnapshotFormat::Json`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn format(&self) -> SnapshotFormat {
        SnapshotFormat::Json
    }

    fn encode(&self, snapshot: &Snapshot<'_>, out: &mut dyn Write) -> Result<()> {
        let document = SnapshotDocument::from_snapshot(snapshot);
        serde_json::to_writer_pretty(&mut *out, &document)
            .map_err(|e| encode_error(SnapshotFormat::Json, e))?;
        out.write_all(b"\n")
            .map_err(|e| encode_error(SnapshotFormat::Json, e))
    }
}
