//! Sprint records: time-boxed groupings of issues.

use super::IssueId;
use beadview_jsonl::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-boxed planning record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Unique identifier for the sprint
    pub id: String,

    /// Display name
    pub name: String,

    /// First day of the sprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    /// Last day of the sprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    /// Issues planned into this sprint
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bead_ids: Vec<IssueId>,
}

impl Sprint {
    /// Whether `now` falls inside the sprint's date range.
    ///
    /// Sprints without both dates are never active.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= now && now <= end,
            _ => false,
        }
    }
}

impl Validate for Sprint {
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("sprint ID cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err(format!("sprint {} has an empty name", self.id));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(format!(
                    "sprint {} ends ({}) before it starts ({})",
                    self.id,
                    end.to_rfc3339(),
                    start.to_rfc3339()
                ));
            }
        }
        Ok(())
    }
}
