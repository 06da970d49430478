//! Error types for record store operations.
//!
//! Per-line parse and validation problems are not errors; they are
//! reported as [`crate::Warning`]s by the resilient loaders.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for record store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading, writing, or syncing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The target of an atomic write names no file.
    #[error("invalid write target: {}", .0.display())]
    InvalidTarget(PathBuf),

    /// The finished scratch file could not be renamed over the target.
    #[error("failed to replace {}: {source}", path.display())]
    Persist {
        /// The target that was left unchanged
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// A caller-supplied writer aborted the write.
    #[error("write aborted: {0}")]
    Aborted(String),
}

/// A specialized Result type for record store operations.
pub type Result<T> = std::result::Result<T, Error>;
