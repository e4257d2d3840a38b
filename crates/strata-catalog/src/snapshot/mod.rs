//! JSON snapshot persistence for the catalog
//!
//! The snapshot is a sorted list of `(filename, record)` pairs so diffs
//! stay readable. Loading a missing snapshot yields an empty catalog;
//! loading a corrupt one is an error rather than silent data loss.

use std::fs;
use std::path::Path;

use tracing::debug;

use strata_core::error::StrataError;

use crate::catalog::{Catalog, CatalogRecord};
use crate::CatalogResult;

/// Load a catalog from a snapshot file, or start empty if none exists
pub fn load_or_create<P: AsRef<Path>>(path: P) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    let catalog = Catalog::new();

    if !path.exists() {
        debug!("no catalog snapshot at {}, starting empty", path.display());
        return Ok(catalog);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| StrataError::io(format!("Failed to read snapshot {}", path.display()), e))?;
    let entries: Vec<(String, CatalogRecord)> =
        serde_json::from_str(&content).map_err(|e| StrataError::SnapshotParse {
            message: format!("{}: {}", path.display(), e),
        })?;

    for (filename, record) in entries {
        catalog.insert_record(filename, record);
    }
    debug!("loaded {} files from {}", catalog.len(), path.display());

    Ok(catalog)
}

/// Persist a catalog to a snapshot file, creating parent directories
pub fn save<P: AsRef<Path>>(catalog: &Catalog, path: P) -> CatalogResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            StrataError::io("Failed to create snapshot directory".to_string(), e)
        })?;
    }

    let content = serde_json::to_string_pretty(&catalog.export()).map_err(|e| {
        StrataError::SnapshotParse {
            message: e.to_string(),
        }
    })?;
    fs::write(path, content)
        .map_err(|e| StrataError::io(format!("Failed to write snapshot {}", path.display()), e))?;

    Ok(())
}
