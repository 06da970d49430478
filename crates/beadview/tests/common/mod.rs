//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use beadview::domain::{Issue, IssueStatus};
use beadview::store;
use std::path::Path;
use std::process::{Command, Output};

/// Run the beadview binary against `repo` with colors disabled.
pub fn run_beadview(repo: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_beadview"))
        .arg("--repo")
        .arg(repo)
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("BEADVIEW_COLOR")
        .output()
        .expect("Failed to execute beadview binary")
}

/// Write raw lines to the repository's issues file.
pub fn write_issue_lines(repo: &Path, lines: &[&str]) {
    let path = store::issues_path(repo);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content).unwrap();
}

/// Shorthand for an open issue.
pub fn open(id: &str, title: &str) -> Issue {
    Issue::new(id, title, IssueStatus::Open)
}

/// A small graph: `c` blocks on `b`, `b` blocks on `a`, and `d` is closed.
pub fn chain() -> Vec<Issue> {
    vec![
        open("a", "Design schema"),
        open("b", "Write migration").depends_on("a"),
        open("c", "Ship feature").depends_on("b"),
        Issue::new("d", "Old cleanup", IssueStatus::Closed),
    ]
}

/// Two issues that block each other, plus one outside the cycle.
pub fn with_cycle() -> Vec<Issue> {
    vec![
        open("A", "First").depends_on("B"),
        open("B", "Second").depends_on("A"),
        open("C", "Bystander"),
    ]
}
