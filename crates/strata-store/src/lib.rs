//! Blob storage and serving for Strata
//!
//! This crate owns everything below the resolver: the canonical storage-key
//! layout, a filesystem blob store split into public and protected trees,
//! per-request access state (authentication flag plus ephemeral grants), and
//! the `AssetStore` composition that turns a request path into an HTTP-like
//! response.

pub mod blob;
pub mod digest;
pub mod grant;
pub mod key;
pub mod serve;

// Re-export main types
pub use blob::{FilesystemStore, Visibility};
pub use digest::content_digest;
pub use grant::{GrantSet, SessionAccess};
pub use key::StorageKeys;
pub use serve::{AssetResponse, AssetStore};

use strata_core::error::StrataError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StrataError>;
