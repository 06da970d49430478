//! Dependency graph construction and graph algorithms using petgraph.
//!
//! ## Edge Direction Convention
//!
//! Edges point from **dependent -> dependency**: if issue A is blocked by
//! issue B, the edge is `A -> B` with weight `Blocks`. Only structural
//! dependency types (`Blocks`, `ParentChild`) become edges; informational
//! links are kept out of cycle and depth analysis.
//!
//! ## Determinism
//!
//! Nodes are inserted in ID order and each issue's dependencies are visited
//! in sorted order, so node and edge indices (and everything derived from
//! them) do not depend on the order of the input slice.

use crate::domain::{DependencyType, Issue, IssueId, IssueStatus};
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A dependency whose target is not in the issue collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DanglingRef {
    /// Issue declaring the dependency
    pub from: IssueId,
    /// Missing issue it points at
    pub to: IssueId,
}

/// Blocked issues and the issues blocking them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocking {
    /// Non-terminal issues with at least one `Blocks` dependency on a
    /// non-terminal issue, sorted by ID.
    pub blocked: Vec<IssueId>,
    /// Issues currently holding up at least one blocked issue, sorted by ID.
    pub blockers: Vec<IssueId>,
}

/// In-memory dependency graph over a collection of issues.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<IssueId, DependencyType>,
    /// Lookup only; never iterated, so hash order cannot leak into results.
    node_map: HashMap<IssueId, NodeIndex>,
    /// Status per node, indexed by `NodeIndex::index()`.
    statuses: Vec<IssueStatus>,
    dangling: Vec<DanglingRef>,
    duplicates: Vec<IssueId>,
}

/// Orders issues by ID, then by content, so the record kept for a duplicated
/// ID is the same whatever the input order.
fn canonical_order(a: &Issue, b: &Issue) -> Ordering {
    a.id.cmp(&b.id)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.status.cmp(&b.status))
        .then_with(|| a.dependencies.cmp(&b.dependencies))
}

/// Sort `issues` canonically and split them into the record kept for each
/// ID and the IDs that were repeated.
fn partition_distinct(issues: &[Issue]) -> (Vec<&Issue>, Vec<IssueId>) {
    let mut sorted: Vec<&Issue> = issues.iter().collect();
    sorted.sort_by(|a, b| canonical_order(a, b));

    let mut kept: Vec<&Issue> = Vec::with_capacity(sorted.len());
    let mut duplicates = BTreeSet::new();
    for issue in sorted {
        match kept.last() {
            Some(prev) if prev.id == issue.id => {
                duplicates.insert(issue.id.clone());
            }
            _ => kept.push(issue),
        }
    }
    (kept, duplicates.into_iter().collect())
}

/// One record per ID, sorted by ID.
///
/// Where an ID repeats, the record kept is the one the dependency graph
/// keeps, so renderers and the analyzer agree on titles and statuses.
#[must_use]
pub fn distinct_issues(issues: &[Issue]) -> Vec<&Issue> {
    partition_distinct(issues).0
}

impl DependencyGraph {
    /// Build the graph for `issues`.
    ///
    /// Duplicate IDs keep the first record in canonical order and are
    /// reported by [`duplicate_ids`](Self::duplicate_ids). Dependencies on
    /// unknown IDs are skipped and reported by [`dangling`](Self::dangling).
    #[must_use]
    pub fn build(issues: &[Issue]) -> Self {
        let (distinct, duplicates) = partition_distinct(issues);

        let mut graph = DiGraph::with_capacity(distinct.len(), 0);
        let mut node_map = HashMap::with_capacity(distinct.len());
        let mut statuses = Vec::with_capacity(distinct.len());
        let mut kept = Vec::with_capacity(distinct.len());

        for issue in distinct {
            let node = graph.add_node(issue.id.clone());
            node_map.insert(issue.id.clone(), node);
            statuses.push(issue.status);
            kept.push((node, issue));
        }

        let mut dangling = BTreeSet::new();
        for (from, issue) in kept {
            let mut deps: Vec<_> = issue.dependencies.iter().collect();
            deps.sort();

            for dep in deps {
                let Some(&to) = node_map.get(&dep.depends_on_id) else {
                    dangling.insert(DanglingRef {
                        from: issue.id.clone(),
                        to: dep.depends_on_id.clone(),
                    });
                    continue;
                };
                if dep.dep_type.is_structural() && graph.find_edge(from, to).is_none() {
                    graph.add_edge(from, to, dep.dep_type);
                }
            }
        }

        Self {
            graph,
            node_map,
            statuses,
            dangling: dangling.into_iter().collect(),
            duplicates,
        }
    }

    /// Number of distinct issues in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of structural dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Issue IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &IssueId> {
        self.graph.node_indices().map(|n| &self.graph[n])
    }

    /// Status of the issue kept for `id`, if present.
    #[must_use]
    pub fn status_of(&self, id: &IssueId) -> Option<IssueStatus> {
        self.node_map.get(id).map(|n| self.statuses[n.index()])
    }

    /// Whether the graph contains `id`.
    #[must_use]
    pub fn contains(&self, id: &IssueId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Edges as `(dependent, dependency, type)` in deterministic order.
    pub fn edges(&self) -> impl Iterator<Item = (&IssueId, &IssueId, DependencyType)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                *edge.weight(),
            )
        })
    }

    /// Dependencies pointing at unknown issues, sorted.
    #[must_use]
    pub fn dangling(&self) -> &[DanglingRef] {
        &self.dangling
    }

    /// IDs that appeared on more than one record, sorted.
    #[must_use]
    pub fn duplicate_ids(&self) -> &[IssueId] {
        &self.duplicates
    }

    /// Find every dependency cycle.
    ///
    /// Each cycle is a strongly connected component with more than one
    /// member, or a single issue that depends on itself. Members are sorted
    /// by ID and the cycles are sorted by their member lists.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<IssueId>> {
        let mut cycles: Vec<Vec<IssueId>> = algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| match scc.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                _ => true,
            })
            .map(|scc| {
                let mut members: Vec<IssueId> =
                    scc.into_iter().map(|n| self.graph[n].clone()).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Depth of every issue in the dependency hierarchy.
    ///
    /// An issue without structural dependencies is at level 0; otherwise
    /// its level is one more than the deepest issue it depends on. Members
    /// of a cycle are collapsed into one unit and share a level.
    #[must_use]
    pub fn levels(&self) -> BTreeMap<IssueId, usize> {
        let condensed = algo::condensation(self.graph.clone(), true);
        let mut levels = BTreeMap::new();

        // make_acyclic removes intra-component edges, so this cannot fail.
        let Ok(order) = algo::toposort(&condensed, None) else {
            return self.ids().map(|id| (id.clone(), 0)).collect();
        };

        let mut unit_level = vec![0usize; condensed.node_count()];
        for &unit in order.iter().rev() {
            unit_level[unit.index()] = condensed
                .neighbors(unit)
                .map(|dep| unit_level[dep.index()] + 1)
                .max()
                .unwrap_or(0);
        }

        for unit in condensed.node_indices() {
            for id in &condensed[unit] {
                levels.insert(id.clone(), unit_level[unit.index()]);
            }
        }
        levels
    }

    /// Length, in edges, of the longest dependency chain.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.levels().into_values().max().unwrap_or(0)
    }

    /// Compute which issues are blocked and which issues block them.
    ///
    /// An issue is blocked when it is not terminal and has a `Blocks`
    /// dependency on an issue that is also not terminal. Dangling
    /// references never block.
    #[must_use]
    pub fn blocking(&self) -> Blocking {
        let mut blocked = Vec::new();
        let mut blockers = BTreeSet::new();

        for node in self.graph.node_indices() {
            if self.statuses[node.index()].is_terminal() {
                continue;
            }

            let mut is_blocked = false;
            for edge in self.graph.edges(node) {
                if *edge.weight() != DependencyType::Blocks {
                    continue;
                }
                let blocker = edge.target();
                if !self.statuses[blocker.index()].is_terminal() {
                    is_blocked = true;
                    blockers.insert(self.graph[blocker].clone());
                }
            }

            if is_blocked {
                blocked.push(self.graph[node].clone());
            }
        }

        Blocking {
            blocked,
            blockers: blockers.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(id: &str) -> Issue {
        Issue::new(id, format!("Issue {id}"), IssueStatus::Open)
    }

    fn closed(id: &str) -> Issue {
        Issue::new(id, format!("Issue {id}"), IssueStatus::Closed)
    }

    fn ids(list: &[&str]) -> Vec<IssueId> {
        list.iter().map(|s| IssueId::new(*s)).collect()
    }

    #[test]
    fn nodes_are_sorted_by_id() {
        let graph = DependencyGraph::build(&[open("c"), open("a"), open("b")]);
        let order: Vec<&str> = graph.ids().map(IssueId::as_str).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn dangling_references_are_reported_not_linked() {
        let graph = DependencyGraph::build(&[open("a").depends_on("ghost")]);

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(
            graph.dangling(),
            &[DanglingRef {
                from: IssueId::new("a"),
                to: IssueId::new("ghost"),
            }]
        );
    }

    #[test]
    fn informational_links_are_not_edges() {
        let graph = DependencyGraph::build(&[
            open("a").with_dependency("b", DependencyType::Related),
            open("b").with_dependency("a", DependencyType::Related),
        ]);

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn repeated_dependency_yields_one_edge() {
        let graph = DependencyGraph::build(&[
            open("a")
                .depends_on("b")
                .with_dependency("b", DependencyType::ParentChild)
                .depends_on("b"),
            open("b"),
        ]);

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].2, DependencyType::Blocks);
    }

    #[test]
    fn two_node_cycle_is_found() {
        let graph = DependencyGraph::build(&[open("b").depends_on("a"), open("a").depends_on("b")]);
        assert_eq!(graph.cycles(), vec![ids(&["a", "b"])]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let graph = DependencyGraph::build(&[open("a").depends_on("a"), open("b")]);
        assert_eq!(graph.cycles(), vec![ids(&["a"])]);
    }

    #[test]
    fn separate_cycles_are_sorted() {
        let graph = DependencyGraph::build(&[
            open("z").depends_on("y"),
            open("y").depends_on("z"),
            open("c").depends_on("d"),
            open("d").depends_on("e"),
            open("e").depends_on("c"),
            open("free"),
        ]);

        assert_eq!(graph.cycles(), vec![ids(&["c", "d", "e"]), ids(&["y", "z"])]);
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let graph = DependencyGraph::build(&[
            open("a").depends_on("b").depends_on("c"),
            open("b").depends_on("c"),
            open("c"),
        ]);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn levels_follow_longest_chain() {
        let graph = DependencyGraph::build(&[
            open("a").depends_on("b").depends_on("d"),
            open("b").depends_on("c"),
            open("c"),
            open("d"),
        ]);

        let levels = graph.levels();
        assert_eq!(levels[&IssueId::new("c")], 0);
        assert_eq!(levels[&IssueId::new("d")], 0);
        assert_eq!(levels[&IssueId::new("b")], 1);
        assert_eq!(levels[&IssueId::new("a")], 2);
        assert_eq!(graph.max_depth(), 2);
    }

    #[test]
    fn cycle_members_share_a_level() {
        let graph = DependencyGraph::build(&[
            open("top").depends_on("a"),
            open("a").depends_on("b"),
            open("b").depends_on("a").depends_on("base"),
            open("base"),
        ]);

        let levels = graph.levels();
        assert_eq!(levels[&IssueId::new("base")], 0);
        assert_eq!(levels[&IssueId::new("a")], 1);
        assert_eq!(levels[&IssueId::new("b")], 1);
        assert_eq!(levels[&IssueId::new("top")], 2);
    }

    #[test]
    fn blocking_ignores_closed_targets_and_closed_dependents() {
        let graph = DependencyGraph::build(&[
            open("a").depends_on("b"),
            open("b"),
            open("c").depends_on("done"),
            closed("done"),
            closed("old").depends_on("b"),
        ]);

        let blocking = graph.blocking();
        assert_eq!(blocking.blocked, ids(&["a"]));
        assert_eq!(blocking.blockers, ids(&["b"]));
    }

    #[test]
    fn parent_child_does_not_block() {
        let graph = DependencyGraph::build(&[
            open("task").with_dependency("epic", DependencyType::ParentChild),
            open("epic"),
        ]);

        assert!(graph.blocking().blocked.is_empty());
    }

    #[test]
    fn duplicate_ids_keep_one_node() {
        let graph = DependencyGraph::build(&[open("a"), closed("a"), open("b")]);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.duplicate_ids(), &[IssueId::new("a")]);
        // Same title, so status decides: Open sorts before Closed.
        assert_eq!(graph.status_of(&IssueId::new("a")), Some(IssueStatus::Open));
    }

    #[test]
    fn duplicate_choice_is_order_independent() {
        let first = DependencyGraph::build(&[closed("a"), open("a")]);
        let second = DependencyGraph::build(&[open("a"), closed("a")]);

        assert_eq!(
            first.status_of(&IssueId::new("a")),
            second.status_of(&IssueId::new("a"))
        );
    }
}
