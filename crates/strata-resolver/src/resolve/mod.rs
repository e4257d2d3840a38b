//! Version-matching and access-decision engine
//!
//! Given a parsed request path, the resolver consults the version repository
//! and access authority and produces a [`Verdict`]. It never constructs
//! storage keys or HTTP responses itself; key layout belongs to the
//! [`KeyBuilder`] and response construction to the store layer.

use tracing::{debug, warn};

use strata_core::types::{FileVersion, LogicalFile, ParsedFileId, Stage, Verdict};

use crate::parse::parse_file_id;
use crate::ResolveResult;

/// Read-only queries against the versioned record store.
///
/// Lookup misses are `Ok(None)`; only infrastructure failures are errors,
/// and they propagate without retries so callers own the retry policy.
#[allow(async_fn_in_trait)]
pub trait VersionRepository {
    /// Look up a logical file's state at the given stage, with its history
    async fn find_logical_file(
        &self,
        filename: &str,
        stage: Stage,
    ) -> ResolveResult<Option<LogicalFile>>;

    /// The highest-numbered published version of `filename` whose digest
    /// starts with `hash_prefix`
    async fn find_published_version(
        &self,
        filename: &str,
        hash_prefix: &str,
    ) -> ResolveResult<Option<FileVersion>>;
}

/// Authentication state and grant lookups for the current request.
///
/// Passed explicitly into every resolution; there is no ambient
/// "current user" global.
pub trait AccessAuthority {
    /// Whether a logged-in principal is making the request
    fn is_authenticated(&self) -> bool;

    /// Whether an ephemeral grant exists for this exact filename and full
    /// digest
    fn has_grant(&self, filename: &str, full_hash: &str) -> bool;
}

/// Canonical storage key construction, owned by the blob store
pub trait KeyBuilder {
    /// Build the storage key for a `(filename, hash, variant)` triple
    fn build_key(&self, filename: &str, hash: &str, variant: Option<&str>) -> String;
}

/// The resolution engine. Stateless per request; the only configuration is
/// which path grammar is in force.
#[derive(Debug, Clone)]
pub struct Resolver {
    /// Use the legacy (hash-less) grammar and key layout
    legacy_filenames: bool,
}

impl Resolver {
    /// Create a resolver for the configured path grammar
    pub fn new(legacy_filenames: bool) -> Self {
        Self { legacy_filenames }
    }

    /// Resolve a request path to a verdict.
    ///
    /// Paths matching neither grammar pass through unmodified and the store
    /// performs its own existence check on the raw key.
    pub async fn resolve<R, A, K>(
        &self,
        path: &str,
        repo: &R,
        access: &A,
        keys: &K,
    ) -> ResolveResult<Verdict>
    where
        R: VersionRepository,
        A: AccessAuthority,
        K: KeyBuilder,
    {
        let Some(parsed) = parse_file_id(path, self.legacy_filenames) else {
            debug!("path {:?} matches neither grammar, passing through", path);
            return Ok(Verdict::ServeOriginal);
        };

        if parsed.has_hash() {
            self.resolve_hashed(&parsed, repo, access, keys).await
        } else {
            self.resolve_legacy(&parsed, repo, keys).await
        }
    }

    /// Case A: the request names one specific revision by fingerprint.
    async fn resolve_hashed<R, A, K>(
        &self,
        parsed: &ParsedFileId,
        repo: &R,
        access: &A,
        keys: &K,
    ) -> ResolveResult<Verdict>
    where
        R: VersionRepository,
        A: AccessAuthority,
        K: KeyBuilder,
    {
        let filename = parsed.file_name();

        // Authenticated principals reach protected content directly by its
        // real stored key; rewriting would bypass the store's own
        // public/protected routing.
        if access.is_authenticated() {
            debug!("authenticated request for {:?}, serving as-is", filename);
            return Ok(Verdict::ServeOriginal);
        }

        // Grants are keyed by full digest, so candidates come from the
        // file's history.
        let draft = repo.find_logical_file(&filename, Stage::Draft).await?;
        if let Some(file) = &draft {
            for full_hash in file.hashes_matching(&parsed.hash) {
                if access.has_grant(&filename, full_hash) {
                    debug!("grant held for {:?} @ {}, serving as-is", filename, full_hash);
                    return Ok(Verdict::ServeOriginal);
                }
            }
        }

        // A stale fingerprint that once pointed at a published revision
        // resolves forward to whatever is live now, not to the historical
        // blob.
        if repo
            .find_published_version(&filename, &parsed.hash)
            .await?
            .is_some()
        {
            if let Some(live) = repo.find_logical_file(&filename, Stage::Live).await? {
                let key = keys.build_key(&filename, &live.content_hash, parsed.variant.as_deref());
                debug!("rewriting {:?} @ {} to live key {:?}", filename, parsed.hash, key);
                return Ok(Verdict::RewriteTo(key));
            }
        }

        // Nothing publicly visible matches. Distinguish "exists but
        // forbidden" from "never existed" for the status code only: a
        // fingerprint no version ever carried is a plain miss.
        let fingerprint_known = draft
            .as_ref()
            .is_some_and(|file| file.versions.iter().any(|v| v.matches_prefix(&parsed.hash)));
        if fingerprint_known {
            warn!("denying unprivileged request for unpublished {:?}", filename);
            Ok(Verdict::Deny)
        } else {
            Ok(Verdict::NotFound)
        }
    }

    /// Case B: a legacy URL identifies content by filename alone. Only the
    /// live stage is consulted; legacy links never resolve draft-only
    /// content, regardless of authentication.
    async fn resolve_legacy<R, K>(
        &self,
        parsed: &ParsedFileId,
        repo: &R,
        keys: &K,
    ) -> ResolveResult<Verdict>
    where
        R: VersionRepository,
        K: KeyBuilder,
    {
        let filename = parsed.file_name();

        match repo.find_logical_file(&filename, Stage::Live).await? {
            Some(live) => {
                let key = keys.build_key(&filename, &live.content_hash, parsed.variant.as_deref());
                debug!("rewriting legacy {:?} to live key {:?}", filename, key);
                Ok(Verdict::RewriteTo(key))
            }
            None => Ok(Verdict::NotFound),
        }
    }
}
