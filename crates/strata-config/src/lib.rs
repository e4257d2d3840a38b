//! Configuration parsing for the Strata asset store
//!
//! This crate handles parsing and validation of strata.toml files, plus
//! layering of defaults, file values, and environment overrides into the
//! runtime configuration consumed by the store and CLI.

pub mod toml;
pub mod merge;

// Re-export main types
pub use toml::{StrataToml, StoreSection, CatalogSection};
pub use merge::{ConfigLoader, ConfigSource};

use strata_core::error::StrataError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, StrataError>;
