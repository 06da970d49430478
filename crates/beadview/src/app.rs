//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that binds a repository path to its
//! viewer configuration and loads the repository's collections.
//!
//! # Example
//!
//! ```no_run
//! use beadview::app::App;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let app = App::open(Path::new("."))?;
//!     let (_path, issues) = app.load_issues(None)?;
//!     println!("{} issues", issues.records.len());
//!     Ok(())
//! }
//! ```

use crate::config::ViewerConfig;
use crate::domain::{Issue, Sprint};
use crate::error::Result;
use crate::store;
use beadview_jsonl::Loaded;
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
#[derive(Debug, Clone)]
pub struct App {
    /// Repository root (the directory containing `.beads/`)
    repo: PathBuf,

    /// Viewer configuration, defaults when no config file exists
    config: ViewerConfig,
}

impl App {
    /// Create an App for the repository at `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewer configuration exists but cannot be
    /// read or is invalid.
    pub fn open(repo: &Path) -> Result<Self> {
        let config = ViewerConfig::load_for_repo(repo)?;
        Ok(Self {
            repo: repo.to_path_buf(),
            config,
        })
    }

    /// Get the repository root.
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Get the viewer configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Load issues from `file`, or from the repository's issues file.
    ///
    /// Returns the path actually read alongside the records and
    /// diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read.
    pub fn load_issues(&self, file: Option<&Path>) -> Result<(PathBuf, Loaded<Issue>)> {
        let path = file.map_or_else(|| store::issues_path(&self.repo), Path::to_path_buf);
        let loaded = store::load_issues_from_file(&path)?;
        Ok((path, loaded))
    }

    /// Load the repository's sprints.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read.
    pub fn load_sprints(&self) -> Result<(PathBuf, Loaded<Sprint>)> {
        let path = store::sprints_path(&self.repo);
        let loaded = store::load_sprints_from_file(&path)?;
        Ok((path, loaded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_path;
    use crate::domain::IssueStatus;
    use crate::error::Error;
    use crate::export::SnapshotFormat;
    use tempfile::TempDir;

    #[test]
    fn open_uninitialized_repo_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let app = App::open(temp_dir.path()).unwrap();
        assert_eq!(app.config(), &ViewerConfig::default());
        assert_eq!(app.repo(), temp_dir.path());

        let (path, issues) = app.load_issues(None).unwrap();
        assert!(path.ends_with(".beads/issues.jsonl"));
        assert!(issues.records.is_empty());
    }

    #[test]
    fn open_reads_viewer_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = config_path(temp_dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "snapshot:\n  format: json\n").unwrap();

        let app = App::open(temp_dir.path()).unwrap();
        assert_eq!(app.config().snapshot.format, SnapshotFormat::Json);
    }

    #[test]
    fn open_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = config_path(temp_dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "snapshot: [").unwrap();

        assert!(matches!(App::open(temp_dir.path()), Err(Error::Config(_))));
    }

    #[test]
    fn issues_file_override() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("elsewhere.jsonl");
        store::save_issues_to_file(&file, &[Issue::new("a", "A", IssueStatus::Open)]).unwrap();

        let app = App::open(temp_dir.path()).unwrap();
        let (path, issues) = app.load_issues(Some(&file)).unwrap();
        assert_eq!(path, file);
        assert_eq!(issues.records.len(), 1);
    }

    #[test]
    fn load_sprints_from_repo() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::open(temp_dir.path()).unwrap();

        let (path, sprints) = app.load_sprints().unwrap();
        assert!(path.ends_with(".beads/sprints.jsonl"));
        assert!(sprints.records.is_empty());
    }
}
