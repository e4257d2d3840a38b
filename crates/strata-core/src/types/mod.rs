//! Core data types for Strata asset resolution.
//!
//! This module provides the fundamental types used throughout the Strata
//! workspace:
//! - Stage for selecting the draft or live view of a file
//! - FileVersion and LogicalFile for version history
//! - ParsedFileId for decomposed request paths
//! - Verdict for resolution outcomes

pub mod parsed;
pub mod stage;
pub mod verdict;
pub mod version;

// Re-export all public types
pub use parsed::ParsedFileId;
pub use stage::Stage;
pub use verdict::Verdict;
pub use version::{FileVersion, LogicalFile, HASH_PREFIX_LEN};
