//! A small, synchronous JSONL (JSON Lines) record store.
//!
//! This library provides line-numbered reading, buffered writing, resilient
//! loading that skips bad lines with structured warnings, and crash-safe
//! atomic writes of JSONL collections.
//!
//! # Example
//!
//! ```no_run
//! use beadview_jsonl::{Validate, load_jsonl, write_jsonl_atomic};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Record {
//!     id: String,
//! }
//!
//! impl Validate for Record {
//!     fn validate(&self) -> Result<(), String> {
//!         if self.id.is_empty() {
//!             return Err("id must not be empty".to_string());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn example() -> beadview_jsonl::Result<()> {
//! let loaded = load_jsonl::<Record>("records.jsonl")?;
//! for warning in &loaded.warnings {
//!     eprintln!("skipped {warning}");
//! }
//! write_jsonl_atomic("records.jsonl", &loaded.records)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod warning;
pub mod writer;

pub use atomic::{write_atomic, write_jsonl_atomic, write_jsonl_atomic_iter};
pub use error::{Error, Result};
pub use reader::{JsonlReader, Loaded, load_jsonl, read_jsonl_resilient};
pub use warning::Warning;
pub use writer::JsonlWriter;

/// Record-level validation applied after a line parses as JSON.
///
/// Records that fail validation are dropped during resilient loading and
/// reported as [`Warning::InvalidRecord`].
pub trait Validate {
    /// Returns `Err` with a human-readable reason when the record is invalid.
    fn validate(&self) -> std::result::Result<(), String>;
}
