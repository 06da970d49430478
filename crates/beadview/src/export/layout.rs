//! Layered placement of dependency graph nodes.
//!
//! Issues are grouped into rows by [`DependencyGraph::levels`]: row 0 holds
//! issues with no structural dependencies, and each dependent sits below the
//! deepest issue it depends on. Within a row nodes are ordered by ID and the
//! row is centered on the widest one. Every coordinate is an integer, so the
//! layout of a given graph is identical across runs and platforms.

use crate::analysis::DependencyGraph;
use crate::domain::IssueId;
use std::collections::BTreeMap;

/// Width of a node box.
pub const NODE_WIDTH: u32 = 180;
/// Height of a node box.
pub const NODE_HEIGHT: u32 = 48;
/// Horizontal gap between boxes in a row.
pub const H_GAP: u32 = 40;
/// Vertical gap between rows.
pub const V_GAP: u32 = 60;
/// Space around the drawing.
pub const MARGIN: u32 = 20;
/// Space reserved above the first row for the summary header.
pub const HEADER_HEIGHT: u32 = 90;
/// Narrowest canvas, wide enough for the header text.
pub const MIN_WIDTH: u32 = 480;
/// How far a self-loop arc bulges past the right side of its box.
pub const SELF_LOOP_REACH: u32 = 36;

/// Top-left corner of a node box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Horizontal offset
    pub x: u32,
    /// Vertical offset
    pub y: u32,
}

impl Position {
    /// Center of the box's top edge.
    #[must_use]
    pub fn top_center(self) -> (u32, u32) {
        (self.x + NODE_WIDTH / 2, self.y)
    }

    /// Center of the box's bottom edge.
    #[must_use]
    pub fn bottom_center(self) -> (u32, u32) {
        (self.x + NODE_WIDTH / 2, self.y + NODE_HEIGHT)
    }
}

/// Computed placement for every node plus the canvas size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    layers: Vec<Vec<IssueId>>,
    positions: BTreeMap<IssueId, Position>,
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl Layout {
    /// Place every node of `graph`.
    #[must_use]
    pub fn compute(graph: &DependencyGraph) -> Self {
        let mut by_level: BTreeMap<usize, Vec<IssueId>> = BTreeMap::new();
        // levels() is keyed by ID, so each row comes out sorted.
        for (id, level) in graph.levels() {
            by_level.entry(level).or_default().push(id);
        }
        let layers: Vec<Vec<IssueId>> = by_level.into_values().collect();

        let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
        let row_width = |n: usize| -> u32 {
            let n = to_u32(n);
            if n == 0 {
                0
            } else {
                n * NODE_WIDTH + (n - 1) * H_GAP
            }
        };
        let content_width = row_width(widest);
        // Rows are centered in the span left of the reserved strip.
        let reach = if graph.edges().any(|(from, to, _)| from == to) {
            SELF_LOOP_REACH
        } else {
            0
        };
        let width = (content_width + 2 * MARGIN + reach).max(MIN_WIDTH);

        let mut positions = BTreeMap::new();
        for (row, layer) in layers.iter().enumerate() {
            let y = HEADER_HEIGHT + MARGIN + to_u32(row) * (NODE_HEIGHT + V_GAP);
            let offset = (width - reach - row_width(layer.len())) / 2;
            for (col, id) in layer.iter().enumerate() {
                let x = offset + to_u32(col) * (NODE_WIDTH + H_GAP);
                positions.insert(id.clone(), Position { x, y });
            }
        }

        let rows = to_u32(layers.len());
        let height = if rows == 0 {
            HEADER_HEIGHT + MARGIN
        } else {
            HEADER_HEIGHT + 2 * MARGIN + rows * NODE_HEIGHT + (rows - 1) * V_GAP
        };

        Self {
            width,
            height,
            layers,
            positions,
        }
    }

    /// Position of `id`, if it is in the graph.
    #[must_use]
    pub fn position(&self, id: &IssueId) -> Option<Position> {
        self.positions.get(id).copied()
    }

    /// Rows of node IDs, top row first.
    #[must_use]
    pub fn layers(&self) -> &[Vec<IssueId>] {
        &self.layers
    }
}
