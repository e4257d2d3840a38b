//! Storage-key utilities for safe file system operations.
//!
//! Storage keys are forward-slash strings relative to a store root. These
//! checks prevent a raw request path from escaping that root when it is
//! passed through to the filesystem unmodified.

use crate::error::{StrataError, StrataResult};

/// Check if a storage key is safe to join beneath a store root
pub fn is_safe_key(key: &str) -> bool {
    if key.is_empty() || key.starts_with('/') || key.contains('\u{0000}') {
        return false;
    }

    for segment in key.split('/') {
        match segment {
            "" | "." | ".." => return false,
            _ => {}
        }
    }

    true
}

/// Normalize a storage key by stripping a leading slash and collapsing
/// empty segments, rejecting traversal attempts
pub fn normalize_key(key: &str) -> StrataResult<String> {
    let trimmed = key.trim_start_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() || segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(StrataError::PathTraversal {
            key: key.to_string(),
        });
    }

    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_safe_key() {
        assert!(is_safe_key("a/b/c.txt"));
        assert!(is_safe_key("c.txt"));
        assert!(!is_safe_key(""));
        assert!(!is_safe_key("/absolute/path"));
        assert!(!is_safe_key("a//b"));
        assert!(!is_safe_key("a/../b"));
        assert!(!is_safe_key("./a"));
        assert!(!is_safe_key("a\u{0000}b/c"));
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("/a/b.txt").unwrap(), "a/b.txt");
        assert_eq!(normalize_key("a//b.txt").unwrap(), "a/b.txt");
        assert!(normalize_key("a/../b.txt").is_err());
        assert!(normalize_key("").is_err());
        assert!(normalize_key("//").is_err());
    }
}
