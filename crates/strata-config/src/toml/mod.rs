//! strata.toml configuration parsing and serialization

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use strata_core::error::StrataError;
use crate::ConfigResult;

/// Complete strata.toml configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrataToml {
    /// Blob store section
    #[serde(default)]
    pub store: StoreSection,

    /// Version catalog section
    #[serde(default)]
    pub catalog: CatalogSection,
}

/// Blob store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Root of the public tree; the protected tree lives at `root/.protected`
    #[serde(default = "default_store_root")]
    pub root: String,

    /// Use the hash-less path grammar and hash-less storage keys
    #[serde(default)]
    pub legacy_filenames: bool,

    /// HTTP status returned for denied requests (403 or 404)
    #[serde(default = "default_denied_status")]
    pub denied_status: u16,
}

/// Version catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Path of the JSON catalog snapshot
    #[serde(default = "default_snapshot_path")]
    pub snapshot: String,
}

fn default_store_root() -> String {
    "assets".to_string()
}

fn default_denied_status() -> u16 {
    403
}

fn default_snapshot_path() -> String {
    "assets/.catalog.json".to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            root: default_store_root(),
            legacy_filenames: false,
            denied_status: default_denied_status(),
        }
    }
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot_path(),
        }
    }
}

impl Default for StrataToml {
    fn default() -> Self {
        Self {
            store: StoreSection::default(),
            catalog: CatalogSection::default(),
        }
    }
}

impl StrataToml {
    /// Root of the public tree as a typed path
    pub fn store_root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.store.root)
    }

    /// Location of the catalog snapshot as a typed path
    pub fn snapshot_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.catalog.snapshot)
    }
}

/// Parse TOML string to StrataToml configuration
pub fn parse_strata_toml(content: &str) -> ConfigResult<StrataToml> {
    let config: StrataToml = toml::from_str(content)
        .map_err(|e| StrataError::TomlParse {
            message: format!("TOML parsing error: {}", e),
        })?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize StrataToml to TOML string
pub fn serialize_strata_toml(config: &StrataToml) -> ConfigResult<String> {
    toml::to_string_pretty(config)
        .map_err(|e| StrataError::TomlParse {
            message: format!("TOML serialization error: {}", e),
        })
}

/// Validate configuration completeness
pub fn validate_config(config: &StrataToml) -> ConfigResult<()> {
    if config.store.root.is_empty() {
        return Err(StrataError::ConfigValidation {
            field: "store.root".to_string(),
            reason: "store root must not be empty".to_string(),
        });
    }

    validate_denied_status(config.store.denied_status)?;

    if config.catalog.snapshot.is_empty() {
        return Err(StrataError::ConfigValidation {
            field: "catalog.snapshot".to_string(),
            reason: "snapshot path must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Check that a denied status is one of the two supported codes
pub fn validate_denied_status(status: u16) -> ConfigResult<()> {
    if status != 403 && status != 404 {
        return Err(StrataError::ConfigValidation {
            field: "store.denied_status".to_string(),
            reason: format!("must be 403 or 404, got {}", status),
        });
    }
    Ok(())
}

/// Load and parse strata.toml from a file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<StrataToml> {
    let content = tokio::fs::read_to_string(path).await
        .map_err(|e| StrataError::io(format!("Failed to read {}", path), e))?;

    parse_strata_toml(&content)
        .map_err(|e| match e {
            StrataError::TomlParse { message } => StrataError::TomlParse {
                message: format!("In file {}: {}", path, message),
            },
            StrataError::ConfigValidation { field, reason } => StrataError::ConfigValidation {
                field,
                reason: format!("In file {}: {}", path, reason),
            },
            other => other,
        })
}
