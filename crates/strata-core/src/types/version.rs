//! Version history types for logical files.
//!
//! A logical file owns an append-only, ordered history of FileVersion
//! records. Versions are created on every content write and never mutated
//! afterwards; publication flips `was_published` exactly once, when the
//! version is promoted to the live stage.

use serde::{Deserialize, Serialize};

/// Number of leading digest characters embedded in request paths and
/// storage keys as a short content fingerprint
pub const HASH_PREFIX_LEN: usize = 10;

/// One immutable revision of a logical file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    /// Monotonically increasing version number within the owning file
    pub version_id: u64,
    /// Full-length content digest of the stored blob
    pub content_hash: String,
    /// True when this version was promoted to the live stage
    pub was_published: bool,
}

impl FileVersion {
    /// Create a new version record
    pub fn new(version_id: u64, content_hash: String, was_published: bool) -> Self {
        Self {
            version_id,
            content_hash,
            was_published,
        }
    }

    /// Check whether this version's digest starts with the given prefix.
    ///
    /// An empty prefix never matches; it marks a legacy (hash-less) request.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.content_hash.starts_with(prefix)
    }

    /// The short fingerprint of this version's digest
    pub fn short_hash(&self) -> &str {
        short_hash(&self.content_hash)
    }
}

/// Truncate a full digest to its path fingerprint.
///
/// Digests are ASCII hex, but the input may be an arbitrary caller-supplied
/// string, so truncation stays on a character boundary.
pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(HASH_PREFIX_LEN) {
        Some((index, _)) => &hash[..index],
        None => hash,
    }
}

/// The state of a logical file at one queried stage.
///
/// `content_hash` and `version_id` describe the revision current at that
/// stage; `versions` is the full ordered history (ascending `version_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalFile {
    /// Stable filename path, e.g. `"dir/name.ext"`
    pub filename: String,
    /// Digest of the revision current at the queried stage
    pub content_hash: String,
    /// Version number of the revision current at the queried stage
    pub version_id: u64,
    /// Complete version history, oldest first
    pub versions: Vec<FileVersion>,
}

impl LogicalFile {
    /// All distinct full digests in the history that start with `prefix`,
    /// newest first. Used to enumerate grant candidates for a request.
    pub fn hashes_matching(&self, prefix: &str) -> Vec<&str> {
        let mut hashes: Vec<&str> = Vec::new();
        for version in self.versions.iter().rev() {
            if version.matches_prefix(prefix) && !hashes.contains(&version.content_hash.as_str()) {
                hashes.push(&version.content_hash);
            }
        }
        hashes
    }

    /// The highest-numbered published version whose digest starts with
    /// `prefix`, if any
    pub fn latest_published_matching(&self, prefix: &str) -> Option<&FileVersion> {
        self.versions
            .iter()
            .filter(|v| v.was_published && v.matches_prefix(prefix))
            .max_by_key(|v| v.version_id)
    }
}
