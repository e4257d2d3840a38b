//! # strata-core
//!
//! Core types and utilities shared across all Strata crates.
//!
//! This crate provides:
//! - Stage, FileVersion and LogicalFile types describing version history
//! - ParsedFileId and Verdict types used during request resolution
//! - StrataError enum for unified error handling
//! - Utility functions for storage-key safety
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Stage, FileVersion, ParsedFileId, Verdict)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{StrataError, StrataResult};
pub use types::{FileVersion, LogicalFile, ParsedFileId, Stage, Verdict, HASH_PREFIX_LEN};
