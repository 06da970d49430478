//! Graphviz DOT encoder.

use super::{Encoder, Snapshot, SnapshotFormat, encode_error};
use crate::domain::{DependencyType, IssueStatus};
use crate::error::Result;
use std::fmt::{self, Write as _};
use std::io::Write;

/// Encoder for [`SnapshotFormat::Dot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DotEncoder;

impl Encoder for DotEncoder {
    fn format(&self) -> SnapshotFormat {
        SnapshotFormat::Dot
    }

    fn encode(&self, snapshot: &Snapshot<'_>, out: &mut dyn Write) -> Result<()> {
        let doc = render(snapshot).map_err(|e| encode_error(SnapshotFormat::Dot, e))?;
        out.write_all(doc.as_bytes())
            .map_err(|e| encode_error(SnapshotFormat::Dot, e))
    }
}

/// Quote `text` as a DOT string literal.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
    out.push('"');
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
    let hash = snapshot.data_hash.as_str();
    let mut s = String::new();

    writeln!(s, "digraph {} {{", quote("beadview"))?;
    writeln!(
        s,
        "  graph [charset=\"UTF-8\", label={}, labelloc=\"t\", comment={}, rankdir=\"BT\"];",
        quote(&format!("{}\ndata hash: {hash}", snapshot.title)),
        quote(&format!("data hash: {hash}"))
    )?;
    writeln!(
        s,
        "  node [shape=\"box\", style=\"rounded,filled\", fontname=\"sans-serif\"];"
    )?;

    for node in &snapshot.nodes {
        let mut attrs = vec![
            format!(
                "label={}",
                quote(&format!("{}\n{}", node.id, snapshot.label(node.title)))
            ),
            format!("tooltip={}", quote(&format!("{}: {}", node.id, node.title))),
            format!("fillcolor={}", quote(status_fill(node.status))),
        ];
        if node.in_cycle {
            attrs.push("color=\"red\"".to_string());
            attrs.push("penwidth=\"3\"".to_string());
        }
        if node.blocked {
            attrs.push("style=\"rounded,filled,dashed\"".to_string());
        }
        writeln!(s, "  {} [{}];", quote(node.id.as_str()), attrs.join(", "))?;
    }

    for edge in &snapshot.edges {
        let style = match edge.dep_type {
            DependencyType::ParentChild => " [style=\"dashed\", label=\"parent-child\"]",
            _ => "",
        };
        writeln!(
            s,
            "  {} -> {}{style};",
            quote(edge.from.as_str()),
            quote(edge.to.as_str())
        )?;
    }

    writeln!(s, "}}")?;
    Ok(s)
}
