//! Dependency analysis over an issue collection.
//!
//! [`analyze`] is a pure function from a slice of issues to a [`Stats`]
//! summary. Structural anomalies (cycles, dangling references, duplicate
//! IDs) are reported as data in the summary, never as errors.

mod graph;

pub use graph::{Blocking, DanglingRef, DependencyGraph, distinct_issues};

use crate::domain::{Issue, IssueId, IssueStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Summary statistics derived from an issue collection.
///
/// Every list is sorted, so two summaries of the same issues compare equal
/// regardless of the order the issues were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of records analyzed, duplicates included
    pub total: usize,

    /// Records per status; every status is present
    pub status_counts: BTreeMap<IssueStatus, usize>,

    /// Issues waiting on an unfinished `blocks` dependency
    pub blocked: Vec<IssueId>,

    /// Issues holding up at least one blocked issue
    pub blockers: Vec<IssueId>,

    /// Dependency cycles, each a sorted list of members
    pub cycles: Vec<Vec<IssueId>>,

    /// Dependencies on issues that are not in the collection
    pub dangling: Vec<DanglingRef>,

    /// IDs carried by more than one record
    pub duplicate_ids: Vec<IssueId>,

    /// Number of structural dependency edges
    pub edge_count: usize,

    /// Longest dependency chain, in edges
    pub max_depth: usize,
}

impl Stats {
    /// Whether any dependency cycle was found.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Every issue that is part of some cycle.
    #[must_use]
    pub fn cycle_members(&self) -> BTreeSet<IssueId> {
        self.cycles.iter().flatten().cloned().collect()
    }

    /// Whether `id` is in the blocked set.
    #[must_use]
    pub fn is_blocked(&self, id: &IssueId) -> bool {
        self.blocked.binary_search(id).is_ok()
    }

    /// Number of records with `status`.
    #[must_use]
    pub fn count(&self, status: IssueStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

/// Analyze `issues` and summarize the dependency graph.
#[must_use]
pub fn analyze(issues: &[Issue]) -> Stats {
    let mut status_counts: BTreeMap<IssueStatus, usize> =
        IssueStatus::ALL.into_iter().map(|s| (s, 0)).collect();
    for issue in issues {
        *status_counts.entry(issue.status).or_insert(0) += 1;
    }

    let graph = DependencyGraph::build(issues);
    let Blocking { blocked, blockers } = graph.blocking();
    let cycles = graph.cycles();

    let stats = Stats {
        total: issues.len(),
        status_counts,
        blocked,
        blockers,
        cycles,
        dangling: graph.dangling().to_vec(),
        duplicate_ids: graph.duplicate_ids().to_vec(),
        edge_count: graph.edge_count(),
        max_depth: graph.max_depth(),
    };

    debug!(
        issues = stats.total,
        edges = stats.edge_count,
        blocked = stats.blocked.len(),
        max_depth = stats.max_depth,
        "Analyzed dependency graph"
    );
    if stats.has_cycles() {
        warn!(cycles = stats.cycles.len(), "Dependency cycles detected");
    }
    if !stats.dangling.is_empty() {
        debug!(count = stats.dangling.len(), "Dependencies on unknown issues");
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyType;

    fn issue(id: &str, status: IssueStatus) -> Issue {
        Issue::new(id, format!("Issue {id}"), status)
    }

    fn ids(list: &[&str]) -> Vec<IssueId> {
        list.iter().map(|s| IssueId::new(*s)).collect()
    }

    #[test]
    fn empty_collection() {
        let stats = analyze(&[]);

        assert_eq!(stats.total, 0);
        assert_eq!(stats.status_counts.len(), IssueStatus::ALL.len());
        assert!(stats.status_counts.values().all(|&n| n == 0));
        assert!(!stats.has_cycles());
        assert_eq!(stats.max_depth, 0);
    }

    #[test]
    fn status_counts_sum_to_total() {
        let stats = analyze(&[
            issue("a", IssueStatus::Open),
            issue("b", IssueStatus::Open),
            issue("c", IssueStatus::InProgress),
            issue("d", IssueStatus::Closed),
        ]);

        assert_eq!(stats.count(IssueStatus::Open), 2);
        assert_eq!(stats.count(IssueStatus::InProgress), 1);
        assert_eq!(stats.count(IssueStatus::Blocked), 0);
        assert_eq!(stats.count(IssueStatus::Closed), 1);
        assert_eq!(stats.status_counts.values().sum::<usize>(), stats.total);
    }

    #[test]
    fn duplicates_count_toward_total() {
        let stats = analyze(&[
            issue("a", IssueStatus::Open),
            issue("a", IssueStatus::Closed),
        ]);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.status_counts.values().sum::<usize>(), 2);
        assert_eq!(stats.duplicate_ids, ids(&["a"]));
    }

    #[test]
    fn mutual_dependency_is_reported_as_cycle() {
        let stats = analyze(&[
            issue("A", IssueStatus::Open).depends_on("B"),
            issue("B", IssueStatus::Open).depends_on("A"),
        ]);

        assert!(stats.has_cycles());
        assert_eq!(stats.cycles, vec![ids(&["A", "B"])]);
        assert_eq!(
            stats.cycle_members(),
            ids(&["A", "B"]).into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn acyclic_chain_reports_depth() {
        let stats = analyze(&[
            issue("a", IssueStatus::Open).depends_on("b"),
            issue("b", IssueStatus::Open).depends_on("c"),
            issue("c", IssueStatus::Open),
        ]);

        assert!(!stats.has_cycles());
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn blocked_policy() {
        let stats = analyze(&[
            issue("waiting", IssueStatus::Open).depends_on("work"),
            issue("work", IssueStatus::InProgress),
            issue("free", IssueStatus::Open).depends_on("done"),
            issue("done", IssueStatus::Closed),
            issue("orphan", IssueStatus::Open).depends_on("missing"),
            issue("linked", IssueStatus::Open).with_dependency("work", DependencyType::Related),
        ]);

        assert_eq!(stats.blocked, ids(&["waiting"]));
        assert_eq!(stats.blockers, ids(&["work"]));
        assert!(stats.is_blocked(&IssueId::new("waiting")));
        assert!(!stats.is_blocked(&IssueId::new("orphan")));
        assert_eq!(
            stats.dangling,
            vec![DanglingRef {
                from: IssueId::new("orphan"),
                to: IssueId::new("missing"),
            }]
        );
    }

    #[test]
    fn input_order_does_not_matter() {
        let issues = vec![
            issue("x", IssueStatus::Open).depends_on("y"),
            issue("y", IssueStatus::Blocked).depends_on("x").depends_on("gone"),
            issue("z", IssueStatus::Closed).depends_on("x"),
        ];
        let mut reversed = issues.clone();
        reversed.reverse();

        assert_eq!(analyze(&issues), analyze(&reversed));
    }

    #[test]
    fn stats_serialize_with_status_names() {
        let stats = analyze(&[issue("a", IssueStatus::InProgress)]);
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["status_counts"]["in_progress"], 1);
        assert_eq!(json["status_counts"]["open"], 0);

        let back: Stats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
