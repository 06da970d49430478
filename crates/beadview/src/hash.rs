//! Content fingerprint of an issue collection.
//!
//! The data hash labels snapshot artifacts so a reader can tell at a glance
//! whether two snapshots were rendered from the same data. It is a short
//! prefix of a SHA-256 digest: fine for change detection, not for integrity.

use crate::domain::Issue;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};

/// Number of hex characters kept from the digest.
pub const DATA_HASH_LEN: usize = 16;

/// Short hex fingerprint of an issue collection
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataHash(String);

impl DataHash {
    /// Borrow the hash as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DataHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DataHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Append a length-prefixed field so adjacent fields cannot run together.
fn push_field(buf: &mut Vec<u8>, field: &str) {
    buf.extend_from_slice(&(field.len() as u64).to_le_bytes());
    buf.extend_from_slice(field.as_bytes());
}

/// Canonical bytes for the hashed fields of one issue.
fn encode_issue(issue: &Issue) -> Vec<u8> {
    let mut buf = Vec::new();
    push_field(&mut buf, issue.id.as_str());
    push_field(&mut buf, &issue.title);
    push_field(&mut buf, issue.status.as_str());

    let mut deps: Vec<_> = issue.dependencies.iter().collect();
    deps.sort();
    buf.extend_from_slice(&(deps.len() as u64).to_le_bytes());
    for dep in deps {
        push_field(&mut buf, dep.depends_on_id.as_str());
        push_field(&mut buf, &dep.dep_type.to_string());
    }
    buf
}

/// Fingerprint the ID, title, status and dependencies of every issue.
///
/// Issues are encoded individually and the encodings sorted before hashing,
/// so the result does not depend on the order of `issues` or of each
/// issue's dependency list.
#[must_use]
pub fn compute_data_hash(issues: &[Issue]) -> DataHash {
    let mut records: Vec<Vec<u8>> = issues.iter().map(encode_issue).collect();
    records.sort();

    let mut hasher = Sha256::new();
    hasher.update((records.len() as u64).to_le_bytes());
    for record in &records {
        hasher.update(record);
    }
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(DATA_HASH_LEN);
    for byte in digest.iter().take(DATA_HASH_LEN / 2) {
        // Writing to a String cannot fail.
        let _ = write!(hex, "{byte:02x}");
    }
    DataHash(hex)
}
