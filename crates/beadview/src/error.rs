//! Error types for beadview operations.
//!
//! Only operation-level failures are errors. Per-line problems while loading
//! a collection are returned as [`beadview_jsonl::Warning`]s, and structural
//! anomalies in the dependency graph (cycles, dangling references) are data
//! in [`crate::analysis::Stats`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for beadview operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// Reading or atomically writing a file through the record store failed.
    #[error("record store error at {}: {source}", path.display())]
    Store {
        /// Target path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: beadview_jsonl::Error,
    },

    /// Requested snapshot format is not one of the supported tags.
    #[error("unsupported snapshot format '{tag}' (supported: {supported})")]
    UnsupportedFormat {
        /// The tag as given
        tag: String,
        /// Comma-separated list of supported tags
        supported: String,
    },

    /// An encoder could not serialize the snapshot.
    #[error("failed to encode {format} snapshot: {message}")]
    Encode {
        /// Format tag of the failing encoder
        format: &'static str,
        /// What went wrong
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Attach `path` to a record-store failure.
    pub(crate) fn store(path: impl Into<PathBuf>, source: beadview_jsonl::Error) -> Self {
        Self::Store {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for beadview operations.
pub type Result<T> = std::result::Result<T, Error>;
