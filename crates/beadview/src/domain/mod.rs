//! Domain types for issue tracking.
//!
//! This module contains the record types read from the tracker's JSONL
//! collections: issues with their dependencies, and sprints.

mod sprint;

pub use sprint::Sprint;

use beadview_jsonl::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum priority value (highest priority)
pub const MIN_PRIORITY: u8 = 0;

/// Maximum priority value (lowest priority)
pub const MAX_PRIORITY: u8 = 4;

/// Default priority for records that omit it
const DEFAULT_PRIORITY: u8 = 2;

/// Unique identifier for an issue
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(pub String);

impl IssueId {
    /// Create a new issue ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IssueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Represents an issue in the tracking system
///
/// Only `id`, `title` and `status` are required when reading JSON; every
/// other field falls back to its default so hand-written and foreign
/// records load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier for the issue
    pub id: IssueId,

    /// Issue title, free-form text
    pub title: String,

    /// Issue description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Current status
    pub status: IssueStatus,

    /// Priority level (0 = highest, 4 = lowest)
    #[serde(default = "default_priority")]
    pub priority: u8,

    /// Issue type
    #[serde(default)]
    pub issue_type: IssueType,

    /// Assignee (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Dependencies on other issues
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,

    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Closed timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

impl Issue {
    /// Create a minimal issue with default priority and type and no dependencies.
    pub fn new(id: impl Into<IssueId>, title: impl Into<String>, status: IssueStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status,
            priority: DEFAULT_PRIORITY,
            issue_type: IssueType::default(),
            assignee: None,
            labels: Vec::new(),
            dependencies: Vec::new(),
            created_at: None,
            updated_at: None,
            closed_at: None,
        }
    }

    /// Add a `blocks` dependency on `id`.
    #[must_use]
    pub fn depends_on(self, id: impl Into<IssueId>) -> Self {
        self.with_dependency(id, DependencyType::Blocks)
    }

    /// Add a dependency of the given type on `id`.
    #[must_use]
    pub fn with_dependency(mut self, id: impl Into<IssueId>, dep_type: DependencyType) -> Self {
        self.dependencies.push(Dependency {
            depends_on_id: id.into(),
            dep_type,
        });
        self
    }
}

impl Validate for Issue {
    fn validate(&self) -> Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err("issue ID cannot be empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err(format!("issue {} has an empty title", self.id));
        }
        if self.priority > MAX_PRIORITY {
            return Err(format!(
                "issue {} has priority {} (must be {}-{})",
                self.id, self.priority, MIN_PRIORITY, MAX_PRIORITY
            ));
        }
        Ok(())
    }
}

/// Status of an issue
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Issue is open and ready to work on
    Open,

    /// Issue is currently being worked on
    #[serde(alias = "in-progress")]
    InProgress,

    /// Issue is marked blocked
    Blocked,

    /// Issue has been completed
    Closed,
}

impl IssueStatus {
    /// Every status, in display order.
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Open,
        IssueStatus::InProgress,
        IssueStatus::Blocked,
        IssueStatus::Closed,
    ];

    /// Whether work on the issue is finished.
    ///
    /// A dependency on a terminal issue never blocks its dependents.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, IssueStatus::Closed)
    }

    /// The wire name used in JSONL records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Blocked => "blocked",
            IssueStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(IssueStatus::Open),
            "in_progress" | "in-progress" => Ok(IssueStatus::InProgress),
            "blocked" => Ok(IssueStatus::Blocked),
            "closed" => Ok(IssueStatus::Closed),
            other => Err(format!("unknown issue status: {other}")),
        }
    }
}

/// Type of issue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    /// Bug fix
    Bug,

    /// New feature
    Feature,

    /// General task
    #[default]
    Task,

    /// Epic (parent issue)
    Epic,

    /// Maintenance/chore
    Chore,
}

/// Dependency between issues
///
/// The referenced issue may be absent from the collection; such dangling
/// references are tolerated and reported by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// ID of the issue this depends on
    pub depends_on_id: IssueId,

    /// Type of dependency
    #[serde(default, alias = "type")]
    pub dep_type: DependencyType,
}

/// Type of dependency relationship
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyType {
    /// Hard blocker - prevents work
    #[default]
    Blocks,

    /// Soft link - informational
    Related,

    /// Hierarchical - epic to task
    ParentChild,

    /// Found during work
    DiscoveredFrom,
}

impl DependencyType {
    /// Whether this relationship forms an edge of the dependency graph.
    ///
    /// `Related` and `DiscoveredFrom` are informational and often point
    /// both ways, so they are left out of cycle and depth analysis.
    #[must_use]
    pub fn is_structural(self) -> bool {
        matches!(self, DependencyType::Blocks | DependencyType::ParentChild)
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DependencyType::Blocks => "blocks",
            DependencyType::Related => "related",
            DependencyType::ParentChild => "parent-child",
            DependencyType::DiscoveredFrom => "discovered-from",
        };
        f.write_str(name)
    }
}
