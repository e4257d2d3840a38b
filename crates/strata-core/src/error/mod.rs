//! Error types and result aliases for Strata operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the Strata workspace with actionable error messages. Resolution
//! misses (unparseable paths, unknown files) are ordinary values, never
//! errors; only genuine infrastructure failures live here.

use thiserror::Error;

/// Unified error type for all Strata operations
#[derive(Error, Debug)]
pub enum StrataError {
    // Config errors
    #[error("Failed to parse strata.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Catalog errors
    #[error("Version catalog unavailable: {message}")]
    CatalogUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to parse catalog snapshot: {message}")]
    SnapshotParse { message: String },

    // Store errors
    #[error("Storage key '{key}' escapes the store root")]
    PathTraversal { key: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Strata operations
pub type StrataResult<T> = Result<T, StrataError>;

impl StrataError {
    /// Create a catalog error from any error type
    pub fn catalog<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CatalogUnavailable {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is transient and worth retrying by the caller
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StrataError::CatalogUnavailable { .. } | StrataError::Io { .. }
        )
    }
}
