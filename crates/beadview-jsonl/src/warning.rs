//! Warning types for non-fatal errors during JSONL loading.
//!
//! When a collection is loaded resiliently, a malformed or invalid line is
//! skipped and described by a [`Warning`] instead of aborting the load. The
//! warnings are returned to the caller as data, so the caller decides how
//! (and whether) to surface them.
//!
//! # Examples
//!
//! ```
//! use beadview_jsonl::Warning;
//!
//! let warning = Warning::MalformedJson {
//!     line_number: 5,
//!     error: "unexpected end of input".to_string(),
//! };
//! assert_eq!(warning.kind(), "malformed_json");
//! assert_eq!(warning.to_string(), "line 5: malformed JSON: unexpected end of input");
//! ```

use serde::Serialize;

/// A non-fatal diagnostic for a single skipped line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A line contained JSON that could not be parsed into the record type.
    MalformedJson {
        /// The 1-based line number where the error occurred.
        line_number: usize,
        /// A description of the JSON parsing error.
        error: String,
    },

    /// A line parsed, but the record failed validation.
    InvalidRecord {
        /// The 1-based line number of the rejected record.
        line_number: usize,
        /// Why the record was rejected.
        reason: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::InvalidRecord { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedJson { line_number, error } => {
                format!("line {line_number}: malformed JSON: {error}")
            }
            Self::InvalidRecord {
                line_number,
                reason,
            } => {
                format!("line {line_number}: invalid record: {reason}")
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    ///
    /// Useful for filtering and grouping warnings without matching on
    /// the enum variants.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::InvalidRecord { .. } => "invalid_record",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}
