//! Viewer configuration.
//!
//! Settings live in `.beads/viewer.yaml` inside the repository. The file is
//! optional and every field has a default, so a partial file only overrides
//! what it names:
//!
//! ```yaml
//! snapshot:
//!   format: dot
//!   title: Sprint 12 dependencies
//!   max_label_chars: 40
//! ```

use crate::error::{Error, Result};
use crate::export::{DEFAULT_MAX_LABEL_CHARS, DEFAULT_TITLE, SnapshotFormat};
use crate::store::BEADS_DIR_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file inside the tracker directory
pub const CONFIG_FILE_NAME: &str = "viewer.yaml";

/// Largest accepted label limit
pub const MAX_LABEL_CHARS_LIMIT: usize = 200;

/// Path of the configuration file for the repository at `repo`.
#[must_use]
pub fn config_path(repo: &Path) -> PathBuf {
    repo.join(BEADS_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Top-level viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Snapshot export settings
    pub snapshot: SnapshotConfig,
}

/// Snapshot export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapshotConfig {
    /// Format used when neither a flag nor the output extension decides
    pub format: SnapshotFormat,

    /// Heading shown in snapshots
    pub title: String,

    /// Longest node label before truncation
    pub max_label_chars: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            format: SnapshotFormat::Svg,
            title: DEFAULT_TITLE.to_string(),
            max_label_chars: DEFAULT_MAX_LABEL_CHARS,
        }
    }
}

impl ViewerConfig {
    /// Load the configuration for the repository at `repo`.
    ///
    /// # Errors
    ///
    /// See [`ViewerConfig::load`].
    pub fn load_for_repo(repo: &Path) -> Result<Self> {
        Self::load(&config_path(repo))
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file exists but cannot be read, and
    /// `Error::Config` if it is not valid YAML or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No viewer config, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
        };
        config.validate()?;
        debug!(path = %path.display(), "Loaded viewer config");
        Ok(config)
    }

    /// Atomically write the configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails and `Error::Store` if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        beadview_jsonl::write_atomic(path, |w| {
            w.write_all(content.as_bytes())?;
            Ok(())
        })
        .map_err(|e| Error::store(path, e))
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let snapshot = &self.snapshot;
        if snapshot.title.trim().is_empty() {
            return Err(Error::Config("snapshot.title cannot be empty".to_string()));
        }
        if snapshot.max_label_chars == 0 || snapshot.max_label_chars > MAX_LABEL_CHARS_LIMIT {
            return Err(Error::Config(format!(
                "snapshot.max_label_chars must be between 1 and {MAX_LABEL_CHARS_LIMIT}, got {}",
                snapshot.max_label_chars
            )));
        }
        Ok(())
    }
}
