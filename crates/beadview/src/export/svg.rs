//! SVG encoder.
//!
//! Produces a standalone UTF-8 SVG document. Every piece of free-form text,
//! whether it lands in a text node or an attribute value, goes through
//! [`escape_xml`] first.

use super::layout::{NODE_HEIGHT, NODE_WIDTH, Position, SELF_LOOP_REACH};
use super::{Encoder, Snapshot, SnapshotEdge, SnapshotFormat, SnapshotNode, encode_error};
use crate::domain::IssueStatus;
use crate::error::Result;
use std::fmt::{self, Write as _};
use std::io::Write;

const EDGE_COLOR: &str = "#495057";
const NODE_STROKE: &str = "#343a40";
const CYCLE_STROKE: &str = "#e03131";

/// Encoder for [`SnapshotFormat::Svg`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgEncoder;

impl Encoder for SvgEncoder {
    fn format(&self) -> SnapshotFormat {
        SnapshotFormat::Svg
    }

    fn encode(&self, snapshot: &Snapshot<'_>, out: &mut dyn Write) -> Result<()> {
        let doc = render(snapshot).map_err(|e| encode_error(SnapshotFormat::Svg, e))?;
        out.write_all(doc.as_bytes())
            .map_err(|e| encode_error(SnapshotFormat::Svg, e))
    }
}

/// Escape `text` for use in XML text content or a quoted attribute value.
///
/// Control characters that XML 1.0 forbids are dropped, so arbitrary titles
/// always yield a well-formed document.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c.is_control() => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

fn status_fill(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::Open => "#d0ebff",
        IssueStatus::InProgress => "#fff3bf",
        IssueStatus::Blocked => "#ffd8a8",
        IssueStatus::Closed => "#d3f9d8",
    }
}

fn render(snapshot: &Snapshot<'_>) -> std::result::Result<String, fmt::Error> {
    let width = snapshot.layout.width;
    let height = snapshot.layout.height;
    let title = escape_xml(snapshot.title);
    let hash = escape_xml(snapshot.data_hash.as_str());
    let mut s = String::new();

    writeln!(s, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
    writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" data-hash="{hash}" font-family="sans-serif" font-size="12">"#
    )?;
    writeln!(s, "  <title>{title}</title>")?;
    writeln!(s, "  <defs>")?;
    writeln!(
        s,
        r#"    <marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto"><path d="M 0 0 L 10 5 L 0 10 z" fill="{EDGE_COLOR}"/></marker>"#
    )?;
    writeln!(s, "  </defs>")?;
    writeln!(
        s,
        r##"  <rect width="100%" height="100%" fill="#ffffff"/>"##
    )?;

    write_header(&mut s, snapshot, &title, &hash)?;

    writeln!(s, r#"  <g class="edges">"#)?;
    for edge in &snapshot.edges {
        write_edge(&mut s, snapshot, edge)?;
    }
    writeln!(s, "  </g>")?;

    writeln!(s, r#"  <g class="nodes">"#)?;
    for node in &snapshot.nodes {
        write_node(&mut s, snapshot, node)?;
    }
    writeln!(s, "  </g>")?;
    writeln!(s, "</svg>")?;
    Ok(s)
}

fn write_header(s: &mut String, snapshot: &Snapshot<'_>, title: &str, hash: &str) -> fmt::Result {
    let stats = snapshot.stats;
    let counts = IssueStatus::ALL
        .iter()
        .map(|status| format!("{status}: {}", stats.count(*status)))
        .collect::<Vec<_>>()
        .join(" | ");

    writeln!(s, r#"  <g class="header">"#)?;
    writeln!(
        s,
        r#"    <text x="20" y="30" font-size="18" font-weight="bold">{title}</text>"#
    )?;
    writeln!(
        s,
        r#"    <text x="20" y="52">Issues: {} | {counts}</text>"#,
        stats.total
    )?;
    writeln!(
        s,
        r#"    <text x="20" y="72">Blocked: {} | Cycles: {} | Max depth: {} | data hash: {hash}</text>"#,
        stats.blocked.len(),
        stats.cycles.len(),
        stats.max_depth
    )?;
    writeln!(s, "  </g>")
}

fn write_edge(s: &mut String, snapshot: &Snapshot<'_>, edge: &SnapshotEdge) -> fmt::Result {
    let (Some(from), Some(to)) = (snapshot.node(&edge.from), snapshot.node(&edge.to)) else {
        return Ok(());
    };
    let attrs = format!(
        r#"data-from="{}" data-to="{}" data-type="{}" stroke="{EDGE_COLOR}" stroke-width="1.5" fill="none" marker-end="url(#arrow)""#,
        escape_xml(edge.from.as_str()),
        escape_xml(edge.to.as_str()),
        edge.dep_type
    );

    if edge.from == edge.to {
        let Position { x, y } = from.position;
        let right = x + NODE_WIDTH;
        return writeln!(
            s,
            r#"    <path d="M {right} {} C {} {}, {} {}, {right} {}" {attrs}/>"#,
            y + 12,
            right + SELF_LOOP_REACH,
            y.saturating_sub(6),
            right + SELF_LOOP_REACH,
            y + NODE_HEIGHT + 6,
            y + NODE_HEIGHT - 12
        );
    }

    let ((x1, y1), (x2, y2)) = if from.position.y > to.position.y {
        (from.position.top_center(), to.position.bottom_center())
    } else if from.position.y < to.position.y {
        (from.position.bottom_center(), to.position.top_center())
    } else {
        // Same row: connect the facing sides.
        let mid = from.position.y + NODE_HEIGHT / 2;
        if from.position.x < to.position.x {
            ((from.position.x + NODE_WIDTH, mid), (to.position.x, mid))
        } else {
            ((from.position.x, mid), (to.position.x + NODE_WIDTH, mid))
        }
    };
    writeln!(
        s,
        r#"    <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" {attrs}/>"#
    )
}

fn write_node(s: &mut String, snapshot: &Snapshot<'_>, node: &SnapshotNode<'_>) -> fmt::Result {
    let Position { x, y } = node.position;
    let id = escape_xml(node.id.as_str());
    let tooltip = escape_xml(&format!("{}: {}", node.id, node.title));
    let label = escape_xml(&snapshot.label(node.title));

    let mut class = String::from("node");
    if node.in_cycle {
        class.push_str(" cycle");
    }
    if node.blocked {
        class.push_str(" blocked");
    }
    let (stroke, stroke_width) = if node.in_cycle {
        (CYCLE_STROKE, 3)
    } else {
        (NODE_STROKE, 1)
    };
    let dash = if node.blocked {
        r#" stroke-dasharray="6 3""#
    } else {
        ""
    };
    let cx = x + NODE_WIDTH / 2;

    writeln!(
        s,
        r#"    <g class="{class}" data-id="{id}" data-status="{}">"#,
        node.status
    )?;
    writeln!(s, "      <title>{tooltip}</title>")?;
    writeln!(
        s,
        r#"      <rect x="{x}" y="{y}" width="{NODE_WIDTH}" height="{NODE_HEIGHT}" rx="6" fill="{}" stroke="{stroke}" stroke-width="{stroke_width}"{dash}/>"#,
        status_fill(node.status)
    )?;
    writeln!(
        s,
        r#"      <text x="{cx}" y="{}" text-anchor="middle" font-weight="bold">{id}</text>"#,
        y + 19
    )?;
    writeln!(
        s,
        r#"      <text x="{cx}" y="{}" text-anchor="middle">{label}</text>"#,
        y + 37
    )?;
    writeln!(s, "    </g>")
}
