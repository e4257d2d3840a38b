//! Resolution verdicts.

use std::fmt;

/// The outcome of resolving a request path against the version catalog.
///
/// A verdict only decides *which* storage key the blob store is asked for;
/// building the HTTP response stays with the store layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Pass the original request path through to the store unmodified
    ServeOriginal,
    /// Serve the canonical key of the file's current live content
    RewriteTo(String),
    /// The file exists but the caller may not see it
    Deny,
    /// Nothing publicly visible matches the request
    NotFound,
}

impl Verdict {
    /// The storage key to serve, when the verdict rewrites the request
    pub fn rewritten_key(&self) -> Option<&str> {
        match self {
            Verdict::RewriteTo(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::ServeOriginal => write!(f, "serve-original"),
            Verdict::RewriteTo(key) => write!(f, "rewrite-to {}", key),
            Verdict::Deny => write!(f, "deny"),
            Verdict::NotFound => write!(f, "not-found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewritten_key() {
        let verdict = Verdict::RewriteTo("a/0123456789/b.txt".to_string());
        assert_eq!(verdict.rewritten_key(), Some("a/0123456789/b.txt"));
        assert_eq!(Verdict::Deny.rewritten_key(), None);
    }
}
