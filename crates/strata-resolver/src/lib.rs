//! Asset path resolution engine for the Strata asset store
//!
//! This crate turns request paths into access verdicts. It decomposes a path
//! under the hash-bearing or legacy grammar, matches the embedded content
//! fingerprint against a file's version history, and decides whether to pass
//! the request through, rewrite it to the current live storage key, or deny
//! it. All state lives behind the consumed `VersionRepository` and
//! `AccessAuthority` interfaces; resolution itself is a pure function of its
//! inputs.

pub mod parse;
pub mod resolve;

// Re-export main types
pub use parse::{parse_file_id, parse_hash_path, parse_legacy_path};
pub use resolve::{AccessAuthority, KeyBuilder, Resolver, VersionRepository};

use strata_core::error::StrataError;

/// Result type for resolver operations
pub type ResolveResult<T> = Result<T, StrataError>;
