//! Ephemeral access grants
//!
//! A grant associates one `(filename, full digest)` pair with the current
//! request or session, letting an otherwise-unauthenticated caller view one
//! specific protected revision. Grants never outlive the session state they
//! live in and carry no other rights.

use dashmap::DashMap;

use strata_resolver::AccessAuthority;

/// Concurrent set of `(filename, full digest)` grants
#[derive(Debug, Default)]
pub struct GrantSet {
    grants: DashMap<(String, String), ()>,
}

impl GrantSet {
    /// Create an empty grant set
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant visibility into one filename/digest pair
    pub fn grant(&self, filename: &str, full_hash: &str) {
        self.grants
            .insert((filename.to_string(), full_hash.to_string()), ());
    }

    /// Revoke a previously issued grant
    pub fn revoke(&self, filename: &str, full_hash: &str) {
        self.grants
            .remove(&(filename.to_string(), full_hash.to_string()));
    }

    /// Check for an exact grant
    pub fn is_granted(&self, filename: &str, full_hash: &str) -> bool {
        self.grants
            .contains_key(&(filename.to_string(), full_hash.to_string()))
    }

    /// Drop all grants
    pub fn clear(&self) {
        self.grants.clear();
    }
}

/// Explicit per-request access state: an authentication flag plus the
/// session's grant set. Passed into every resolution instead of being
/// looked up from ambient globals.
#[derive(Debug, Default)]
pub struct SessionAccess {
    authenticated: bool,
    grants: GrantSet,
}

impl SessionAccess {
    /// Anonymous session with no grants
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for a logged-in principal
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            grants: GrantSet::new(),
        }
    }

    /// The session's grant set
    pub fn grants(&self) -> &GrantSet {
        &self.grants
    }
}

impl AccessAuthority for SessionAccess {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn has_grant(&self, filename: &str, full_hash: &str) -> bool {
        self.grants.is_granted(filename, full_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_and_revoke() {
        let grants = GrantSet::new();
        grants.grant("a/b.txt", "0123456789abcdef");
        assert!(grants.is_granted("a/b.txt", "0123456789abcdef"));
        assert!(!grants.is_granted("a/b.txt", "fedcba9876543210"));
        assert!(!grants.is_granted("a/other.txt", "0123456789abcdef"));

        grants.revoke("a/b.txt", "0123456789abcdef");
        assert!(!grants.is_granted("a/b.txt", "0123456789abcdef"));
    }

    #[test]
    fn test_session_access() {
        let session = SessionAccess::anonymous();
        assert!(!session.is_authenticated());
        session.grants().grant("a/b.txt", "0123456789abcdef");
        assert!(session.has_grant("a/b.txt", "0123456789abcdef"));

        assert!(SessionAccess::authenticated().is_authenticated());
    }
}
