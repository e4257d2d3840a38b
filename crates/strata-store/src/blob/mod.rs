//! Filesystem blob store with public and protected trees
//!
//! Mirrors the on-disk layout of the serving tier: published blobs live
//! directly under the store root and are world-readable; draft and
//! unpublished blobs live under `<root>/.protected` and are only reachable
//! for authenticated or granted callers. Placement (which tree a blob lands
//! in, and when it moves) is the caller's concern; this store only reads,
//! writes and moves blobs by key.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tokio::fs as async_fs;
use tracing::debug;

use strata_core::error::StrataError;
use strata_core::utils::path::normalize_key;

use crate::StoreResult;

/// Directory under the store root holding non-public blobs
pub const PROTECTED_DIR: &str = ".protected";

/// Which tree of the store a blob lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// World-readable, served without access checks
    Public,
    /// Reachable only for authenticated or granted callers
    Protected,
}

/// Dual-tree filesystem blob store
#[derive(Debug)]
pub struct FilesystemStore {
    /// Root of the public tree
    public_root: Utf8PathBuf,
    /// Root of the protected tree (`<public_root>/.protected`)
    protected_root: Utf8PathBuf,
}

impl FilesystemStore {
    /// Open a store rooted at `root`, creating both trees if needed
    pub fn new<P: AsRef<Utf8Path>>(root: P) -> StoreResult<Self> {
        let public_root = root.as_ref().to_path_buf();
        let protected_root = public_root.join(PROTECTED_DIR);

        fs::create_dir_all(&public_root)
            .map_err(|e| StrataError::io("Failed to create store root".to_string(), e))?;
        fs::create_dir_all(&protected_root)
            .map_err(|e| StrataError::io("Failed to create protected tree".to_string(), e))?;

        Ok(Self {
            public_root,
            protected_root,
        })
    }

    /// Root of the public tree
    pub fn public_root(&self) -> &Utf8Path {
        &self.public_root
    }

    /// Map a storage key into one of the trees, rejecting traversal.
    ///
    /// The protected tree nests under the public root, so public keys may
    /// not name it; otherwise a raw request path could reach protected
    /// blobs without any access check.
    fn key_to_path(&self, key: &str, visibility: Visibility) -> StoreResult<Utf8PathBuf> {
        let key = normalize_key(key)?;
        if visibility == Visibility::Public && key.split('/').next() == Some(PROTECTED_DIR) {
            return Err(StrataError::PathTraversal { key });
        }
        let root = match visibility {
            Visibility::Public => &self.public_root,
            Visibility::Protected => &self.protected_root,
        };
        Ok(root.join(key))
    }

    /// Check whether a blob exists under the given tree
    pub fn contains(&self, key: &str, visibility: Visibility) -> bool {
        self.key_to_path(key, visibility)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    /// Read a blob from the given tree, `None` when absent
    pub async fn read(&self, key: &str, visibility: Visibility) -> StoreResult<Option<Vec<u8>>> {
        let path = self.key_to_path(key, visibility)?;
        match async_fs::read(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StrataError::io(
                format!("Failed to read blob {}", path),
                e,
            )),
        }
    }

    /// Write a blob into the given tree, creating parent directories
    pub fn put(&self, key: &str, content: &[u8], visibility: Visibility) -> StoreResult<()> {
        let path = self.key_to_path(key, visibility)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StrataError::io("Failed to create blob directory".to_string(), e))?;
        }
        fs::write(&path, content)
            .map_err(|e| StrataError::io(format!("Failed to write blob {}", path), e))?;
        debug!("stored blob {} ({:?})", key, visibility);
        Ok(())
    }

    /// Remove a blob from the given tree; removing an absent blob is fine
    pub fn remove(&self, key: &str, visibility: Visibility) -> StoreResult<()> {
        let path = self.key_to_path(key, visibility)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StrataError::io(
                format!("Failed to remove blob {}", path),
                e,
            )),
        }
    }

    /// Move a blob from the protected tree into the public tree
    pub fn promote(&self, key: &str) -> StoreResult<()> {
        self.move_between(key, Visibility::Protected, Visibility::Public)
    }

    /// Move a blob from the public tree into the protected tree
    pub fn demote(&self, key: &str) -> StoreResult<()> {
        self.move_between(key, Visibility::Public, Visibility::Protected)
    }

    fn move_between(&self, key: &str, from: Visibility, to: Visibility) -> StoreResult<()> {
        let source = self.key_to_path(key, from)?;
        let target = self.key_to_path(key, to)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StrataError::io("Failed to create blob directory".to_string(), e))?;
        }
        fs::rename(&source, &target)
            .map_err(|e| StrataError::io(format!("Failed to move blob {}", key), e))?;
        debug!("moved blob {} ({:?} -> {:?})", key, from, to);
        Ok(())
    }
}
