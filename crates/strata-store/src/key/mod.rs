//! Canonical storage-key layout
//!
//! The store, not the resolver, owns how `(filename, hash, variant)`
//! triples map to keys. The hash-aware layout nests the blob under a
//! ten-character fingerprint directory:
//!
//! ```text
//! folder/<first 10 of hash>/basename(__variant).ext
//! ```
//!
//! With `legacy_filenames` enabled the fingerprint directory is omitted and
//! keys collide across revisions, which is exactly the legacy behavior the
//! flag preserves.

use strata_core::types::version::short_hash;
use strata_resolver::KeyBuilder;

/// Storage-key builder for the configured layout
#[derive(Debug, Clone)]
pub struct StorageKeys {
    legacy_filenames: bool,
}

impl StorageKeys {
    /// Create a key builder for the configured layout
    pub fn new(legacy_filenames: bool) -> Self {
        Self { legacy_filenames }
    }

    /// Split a filename into folder (trailing slash kept), basename and
    /// extension
    fn split_filename(filename: &str) -> (&str, &str, &str) {
        let (folder, name) = match filename.rfind('/') {
            Some(i) => (&filename[..=i], &filename[i + 1..]),
            None => ("", filename),
        };
        match name.find('.') {
            Some(i) => (folder, &name[..i], &name[i..]),
            None => (folder, name, ""),
        }
    }
}

impl KeyBuilder for StorageKeys {
    fn build_key(&self, filename: &str, hash: &str, variant: Option<&str>) -> String {
        let (folder, basename, extension) = Self::split_filename(filename);
        let variant_part = variant.map(|v| format!("__{}", v)).unwrap_or_default();

        if self.legacy_filenames {
            format!("{folder}{basename}{variant_part}{extension}")
        } else {
            format!(
                "{folder}{}/{basename}{variant_part}{extension}",
                short_hash(hash)
            )
        }
    }
}
