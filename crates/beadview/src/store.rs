//! Issue and sprint collections on disk.
//!
//! Both collections live as JSONL files under the repository's `.beads/`
//! directory. Every entry point takes the repository path explicitly.
//!
//! Loading is resilient: a missing file is an empty collection, and bad
//! lines are skipped and returned as warnings alongside the records.
//! Saving is atomic: the file is either the previous content or the
//! complete new content, never a mix.

use crate::domain::{Issue, Sprint};
use crate::error::{Error, Result};
use beadview_jsonl::{Loaded, load_jsonl, write_jsonl_atomic};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the tracker directory inside a repository
pub const BEADS_DIR_NAME: &str = ".beads";

/// Name of the issues data file
pub const ISSUES_FILE_NAME: &str = "issues.jsonl";

/// Name of the sprints data file
pub const SPRINTS_FILE_NAME: &str = "sprints.jsonl";

/// Path of the issues file for the repository at `repo`.
#[must_use]
pub fn issues_path(repo: &Path) -> PathBuf {
    repo.join(BEADS_DIR_NAME).join(ISSUES_FILE_NAME)
}

/// Path of the sprints file for the repository at `repo`.
#[must_use]
pub fn sprints_path(repo: &Path) -> PathBuf {
    repo.join(BEADS_DIR_NAME).join(SPRINTS_FILE_NAME)
}

/// Load issues from `.beads/issues.jsonl` under `repo`.
///
/// # Errors
///
/// Returns an error only if the file exists but cannot be read.
pub fn load_issues(repo: &Path) -> Result<Loaded<Issue>> {
    load_issues_from_file(&issues_path(repo))
}

/// Load issues from a specific JSONL file.
///
/// # Errors
///
/// Returns an error only if the file exists but cannot be read.
pub fn load_issues_from_file(path: &Path) -> Result<Loaded<Issue>> {
    load_collection(path, "issue")
}

/// Save issues to `.beads/issues.jsonl` under `repo`.
///
/// # Errors
///
/// Returns an error if the directory, scratch file, or rename fails.
pub fn save_issues(repo: &Path, issues: &[Issue]) -> Result<()> {
    save_issues_to_file(&issues_path(repo), issues)
}

/// Atomically save issues to a specific file.
///
/// Records are written exactly as given, dependency order included, so a
/// reload returns equal issues.
///
/// # Errors
///
/// Returns an error if the directory, scratch file, or rename fails.
pub fn save_issues_to_file(path: &Path, issues: &[Issue]) -> Result<()> {
    write_jsonl_atomic(path, issues).map_err(|e| Error::store(path, e))?;
    debug!(path = %path.display(), count = issues.len(), "Saved issues");
    Ok(())
}

/// Load sprints from `.beads/sprints.jsonl` under `repo`.
///
/// # Errors
///
/// Returns an error only if the file exists but cannot be read.
pub fn load_sprints(repo: &Path) -> Result<Loaded<Sprint>> {
    load_sprints_from_file(&sprints_path(repo))
}

/// Load sprints from a specific JSONL file.
///
/// # Errors
///
/// Returns an error only if the file exists but cannot be read.
pub fn load_sprints_from_file(path: &Path) -> Result<Loaded<Sprint>> {
    load_collection(path, "sprint")
}

/// Save sprints to `.beads/sprints.jsonl` under `repo`.
///
/// # Errors
///
/// Returns an error if the directory, scratch file, or rename fails.
pub fn save_sprints(repo: &Path, sprints: &[Sprint]) -> Result<()> {
    save_sprints_to_file(&sprints_path(repo), sprints)
}

/// Atomically save sprints to a specific file.
///
/// # Errors
///
/// Returns an error if the directory, scratch file, or rename fails.
pub fn save_sprints_to_file(path: &Path, sprints: &[Sprint]) -> Result<()> {
    write_jsonl_atomic(path, sprints).map_err(|e| Error::store(path, e))?;
    debug!(path = %path.display(), count = sprints.len(), "Saved sprints");
    Ok(())
}

fn load_collection<T>(path: &Path, kind: &str) -> Result<Loaded<T>>
where
    T: serde::de::DeserializeOwned + beadview_jsonl::Validate,
{
    let loaded = load_jsonl::<T>(path).map_err(|e| Error::store(path, e))?;
    if !loaded.is_clean() {
        warn!(
            path = %path.display(),
            kind,
            skipped = loaded.warnings.len(),
            "Skipped unreadable records"
        );
    }
    Ok(loaded)
}
