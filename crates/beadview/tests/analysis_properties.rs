//! Property tests for graph analysis and the data hash.

use beadview::analysis::analyze;
use beadview::domain::{DependencyType, Issue, IssueStatus};
use beadview::hash::{DATA_HASH_LEN, compute_data_hash};
use proptest::prelude::*;

fn status() -> impl Strategy<Value = IssueStatus> {
    prop::sample::select(IssueStatus::ALL.to_vec())
}

fn dep_type() -> impl Strategy<Value = DependencyType> {
    prop::sample::select(vec![
        DependencyType::Blocks,
        DependencyType::Related,
        DependencyType::ParentChild,
        DependencyType::DiscoveredFrom,
    ])
}

/// Issues drawn from a small ID space so duplicates, cycles, and dangling
/// references all show up regularly.
fn issues() -> impl Strategy<Value = Vec<Issue>> {
    let issue = (
        0u8..12,
        "[a-z <&>]{1,12}",
        status(),
        prop::collection::vec((0u8..14, dep_type()), 0..4),
    )
        .prop_map(|(id, title, status, deps)| {
            let title = if title.trim().is_empty() {
                "x".to_string()
            } else {
                title
            };
            deps.into_iter()
                .fold(Issue::new(format!("i{id}"), title, status), |issue, (to, ty)| {
                    issue.with_dependency(format!("i{to}"), ty)
                })
        });
    prop::collection::vec(issue, 0..20)
}

proptest! {
    #[test]
    fn status_counts_sum_to_total(issues in issues()) {
        let stats = analyze(&issues);

        prop_assert_eq!(stats.total, issues.len());
        prop_assert_eq!(stats.status_counts.values().sum::<usize>(), issues.len());
    }

    #[test]
    fn analysis_ignores_input_order(issues in issues(), seed in any::<u64>()) {
        let mut shuffled = issues.clone();
        // Deterministic rotation plus reversal stands in for a shuffle
        if !shuffled.is_empty() {
            let k = usize::try_from(seed % shuffled.len() as u64).unwrap();
            shuffled.rotate_left(k);
        }
        shuffled.reverse();

        prop_assert_eq!(analyze(&issues), analyze(&shuffled));
        prop_assert_eq!(compute_data_hash(&issues), compute_data_hash(&shuffled));
    }

    #[test]
    fn hash_has_fixed_width_hex(issues in issues()) {
        let hash = compute_data_hash(&issues);

        prop_assert_eq!(hash.as_str().len(), DATA_HASH_LEN);
        prop_assert!(hash.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn blocked_issues_are_never_closed(issues in issues()) {
        let stats = analyze(&issues);

        for id in &stats.blocked {
            prop_assert!(
                issues
                    .iter()
                    .any(|i| &i.id == id && i.status != IssueStatus::Closed)
            );
        }
    }

    #[test]
    fn cycle_members_are_known_issues(issues in issues()) {
        let stats = analyze(&issues);

        for id in stats.cycle_members() {
            prop_assert!(issues.iter().any(|i| i.id == id));
        }
        for dangling in &stats.dangling {
            prop_assert!(!issues.iter().any(|i| i.id == dangling.to));
        }
    }
}
