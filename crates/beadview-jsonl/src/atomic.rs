//! Atomic write operations.
//!
//! This module provides crash-safe file replacement using the
//! temp-file-then-rename pattern:
//!
//! 1. Data is written to a uniquely named scratch file (`<name>.tmp-XXXXXX`)
//!    in the same directory as the target
//! 2. The scratch file is flushed and synced to disk
//! 3. The scratch file is renamed over the target path
//!
//! Renames within one filesystem are atomic, so readers of the target path
//! only ever observe the previous content or the complete new content. If
//! any step fails, the scratch file is removed and the target is untouched.
//! Because scratch names are unique, concurrent writers to the same target
//! never interleave: the last rename wins.
//!
//! # Examples
//!
//! ```no_run
//! use beadview_jsonl::write_jsonl_atomic;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Record {
//!     id: u32,
//!     name: String,
//! }
//!
//! # fn example() -> beadview_jsonl::Result<()> {
//! let records = vec![
//!     Record { id: 1, name: "Alice".to_string() },
//!     Record { id: 2, name: "Bob".to_string() },
//! ];
//!
//! write_jsonl_atomic("data.jsonl", &records)?;
//! # Ok(())
//! # }
//! ```

use crate::{Error, JsonlWriter, Result};
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Atomically replaces the file at `path` with whatever `write` produces.
///
/// Missing parent directories are created. The closure receives a buffered
/// writer over the scratch file; returning an error from it aborts the
/// write, removes the scratch file, and leaves `path` unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - `path` has no file name component
/// - The parent directory or the scratch file cannot be created
/// - `write` returns an error
/// - Flushing, syncing, or the final rename fails
pub fn write_atomic<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidTarget(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut prefix = file_name.to_os_string();
    prefix.push(".tmp-");
    // The scratch file deletes itself when dropped, so every early return
    // below leaves no trace in `dir`.
    let scratch = tempfile::Builder::new()
        .prefix(&prefix)
        .tempfile_in(dir)?;

    let mut writer = BufWriter::new(scratch);
    write(&mut writer)?;
    let scratch = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    scratch.as_file().sync_all()?;
    scratch.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), "Atomically replaced file");
    Ok(())
}

/// Atomically writes a slice of values to a JSONL file.
///
/// # Errors
///
/// See [`write_atomic`]; serialization failures also abort the write.
pub fn write_jsonl_atomic<T, P>(path: P, values: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_jsonl_atomic_iter(path, values.iter())
}

/// Atomically writes an iterator of values to a JSONL file.
///
/// # Errors
///
/// See [`write_atomic`]; serialization failures also abort the write.
pub fn write_jsonl_atomic_iter<T, I, P>(path: P, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
    P: AsRef<Path>,
{
    write_atomic(path, |out| {
        let mut writer = JsonlWriter::new(out);
        writer.write_all(values)?;
        writer.flush()
    })
}
