//! Utility functions and helpers.
//!
//! Common functionality used across multiple Strata crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{is_safe_key, normalize_key};
