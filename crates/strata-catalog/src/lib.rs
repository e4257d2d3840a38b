//! Version-history catalog for the Strata asset store
//!
//! This crate provides the versioned record repository the resolver queries:
//! an append-only history of content digests per logical file, with a live
//! pointer per file, safe for concurrent reads. A JSON snapshot keeps the
//! catalog durable between runs; the snapshot is tooling-facing and not a
//! serving-path concern.

pub mod catalog;
pub mod snapshot;

// Re-export main types
pub use catalog::{Catalog, CatalogRecord};

use strata_core::error::StrataError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, StrataError>;
