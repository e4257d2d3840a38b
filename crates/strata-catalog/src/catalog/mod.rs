//! In-memory version catalog with concurrent reads
//!
//! Each logical file owns an ordered, append-only history of versions plus
//! an optional live pointer. Mutations exist for the write path (saving,
//! publishing, archiving); the resolver only ever reads, through the
//! `VersionRepository` interface.

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use strata_core::types::{FileVersion, LogicalFile, Stage};
use strata_resolver::VersionRepository;

use crate::CatalogResult;

/// The version history of one logical file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Complete history, oldest first, never mutated after append
    pub versions: Vec<FileVersion>,
    /// Version currently promoted to the live stage
    pub live: Option<u64>,
    /// When the record was created (unix timestamp)
    pub created_at: i64,
    /// When the record last changed (unix timestamp)
    pub updated_at: i64,
}

impl CatalogRecord {
    fn new() -> Self {
        let now = Utc::now().timestamp();
        Self {
            versions: Vec::new(),
            live: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().timestamp();
    }

    /// The version current at the given stage
    pub fn current(&self, stage: Stage) -> Option<&FileVersion> {
        match stage {
            Stage::Draft => self.versions.last(),
            Stage::Live => self
                .live
                .and_then(|id| self.versions.iter().find(|v| v.version_id == id)),
        }
    }
}

/// Concurrent catalog of logical files and their version histories
#[derive(Debug, Default)]
pub struct Catalog {
    files: DashMap<String, CatalogRecord>,
}

impl Catalog {
    /// Create an empty in-memory catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new draft version for a file, returning its version number
    pub fn record(&self, filename: &str, content_hash: &str) -> u64 {
        let mut record = self
            .files
            .entry(filename.to_string())
            .or_insert_with(CatalogRecord::new);
        let version_id = record.versions.last().map(|v| v.version_id).unwrap_or(0) + 1;
        record
            .versions
            .push(FileVersion::new(version_id, content_hash.to_string(), false));
        record.touch();
        debug!("recorded {:?} v{} ({})", filename, version_id, content_hash);
        version_id
    }

    /// Promote the latest draft to the live stage.
    ///
    /// Returns the published version, or `None` for an unknown or empty
    /// file. Publication is the only mutation a version record ever sees.
    pub fn publish(&self, filename: &str) -> Option<FileVersion> {
        let mut record = self.files.get_mut(filename)?;
        let latest = record.versions.last_mut()?;
        latest.was_published = true;
        let published = latest.clone();
        record.live = Some(published.version_id);
        record.touch();
        debug!("published {:?} v{}", filename, published.version_id);
        Some(published)
    }

    /// Take a file off the live stage. Its history keeps recording that
    /// the version was once published.
    pub fn unpublish(&self, filename: &str) -> Option<u64> {
        let mut record = self.files.get_mut(filename)?;
        let former = record.live.take();
        record.touch();
        former
    }

    /// Remove a file and its entire history. Afterwards the file surfaces
    /// everywhere as simply not found.
    pub fn archive(&self, filename: &str) -> bool {
        self.files.remove(filename).is_some()
    }

    /// A clone of one file's record
    pub fn get(&self, filename: &str) -> Option<CatalogRecord> {
        self.files.get(filename).map(|r| r.clone())
    }

    /// The version currently live for a file
    pub fn live_version(&self, filename: &str) -> Option<FileVersion> {
        self.files
            .get(filename)
            .and_then(|r| r.current(Stage::Live).cloned())
    }

    /// All known filenames, sorted
    pub fn filenames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of cataloged files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub(crate) fn insert_record(&self, filename: String, record: CatalogRecord) {
        self.files.insert(filename, record);
    }

    pub(crate) fn export(&self) -> Vec<(String, CatalogRecord)> {
        let mut entries: Vec<(String, CatalogRecord)> = self
            .files
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl VersionRepository for Catalog {
    async fn find_logical_file(
        &self,
        filename: &str,
        stage: Stage,
    ) -> CatalogResult<Option<LogicalFile>> {
        let Some(record) = self.files.get(filename) else {
            return Ok(None);
        };

        Ok(record.current(stage).map(|current| LogicalFile {
            filename: filename.to_string(),
            content_hash: current.content_hash.clone(),
            version_id: current.version_id,
            versions: record.versions.clone(),
        }))
    }

    async fn find_published_version(
        &self,
        filename: &str,
        hash_prefix: &str,
    ) -> CatalogResult<Option<FileVersion>> {
        Ok(self.files.get(filename).and_then(|record| {
            record
                .versions
                .iter()
                .filter(|v| v.was_published && v.matches_prefix(hash_prefix))
                .max_by_key(|v| v.version_id)
                .cloned()
        }))
    }
}

#[cfg(test)]
mod tests;
