//! Request serving
//!
//! `AssetStore` is the single entry point offered upward: it computes a
//! verdict with the resolver, then delegates byte retrieval to the
//! filesystem store with either the rewritten key or the original path.
//! This is the only place HTTP-like responses are built.

use tracing::debug;

use strata_core::types::{Stage, Verdict};
use strata_core::utils::path::is_safe_key;
use strata_resolver::{parse_file_id, AccessAuthority, Resolver, VersionRepository};

use crate::blob::{FilesystemStore, Visibility, PROTECTED_DIR};
use crate::key::StorageKeys;
use crate::StoreResult;

/// HTTP-like response returned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    /// Status code: 200, 403 or 404
    pub status: u16,
    /// Response headers
    pub headers: Vec<(String, String)>,
    /// Blob content; empty for non-200 responses
    pub body: Vec<u8>,
}

impl AssetResponse {
    /// Successful response carrying a blob
    pub fn ok(key: &str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            headers: vec![
                ("Content-Type".to_string(), content_type_for(key).to_string()),
                ("Content-Length".to_string(), body.len().to_string()),
            ],
            body,
        }
    }

    /// Denied response with the configured status code
    pub fn denied(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Nothing visible matches the request
    pub fn not_found() -> Self {
        Self {
            status: 404,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }
}

/// Guess a content type from the key's trailing extension
fn content_type_for(key: &str) -> &'static str {
    let extension = key.rsplit('.').next().unwrap_or("");
    match extension {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "gz" => "application/gzip",
        _ => "application/octet-stream",
    }
}

/// Versioned, access-checked asset store.
///
/// Composes the resolver, the version repository and the filesystem blob
/// store. Stateless per request; all mutable state lives in the repository
/// and the per-request access authority.
#[derive(Debug)]
pub struct AssetStore<R> {
    repo: R,
    blobs: FilesystemStore,
    keys: StorageKeys,
    resolver: Resolver,
    legacy_filenames: bool,
    denied_status: u16,
}

impl<R: VersionRepository> AssetStore<R> {
    /// Compose a store over a version repository and blob trees
    pub fn new(repo: R, blobs: FilesystemStore, legacy_filenames: bool, denied_status: u16) -> Self {
        Self {
            repo,
            blobs,
            keys: StorageKeys::new(legacy_filenames),
            resolver: Resolver::new(legacy_filenames),
            legacy_filenames,
            denied_status,
        }
    }

    /// The underlying blob store
    pub fn blobs(&self) -> &FilesystemStore {
        &self.blobs
    }

    /// The canonical key builder
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// The version repository
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Resolve a request path to an access verdict without serving bytes
    pub async fn resolve<A: AccessAuthority>(
        &self,
        path: &str,
        access: &A,
    ) -> StoreResult<Verdict> {
        let verdict = self
            .resolver
            .resolve(path, &self.repo, access, &self.keys)
            .await?;
        debug!("verdict for {:?}: {}", path, verdict);
        Ok(verdict)
    }

    /// Serve the blob an already-computed verdict points at
    pub async fn respond<A: AccessAuthority>(
        &self,
        verdict: &Verdict,
        path: &str,
        access: &A,
    ) -> StoreResult<AssetResponse> {
        match verdict {
            Verdict::ServeOriginal => self.serve_raw(path, access).await,
            Verdict::RewriteTo(key) => self.serve_public(key).await,
            Verdict::Deny => Ok(AssetResponse::denied(self.denied_status)),
            Verdict::NotFound => Ok(AssetResponse::not_found()),
        }
    }

    /// Resolve a request path and serve the matching blob.
    ///
    /// Only infrastructure failures are errors; every access outcome is an
    /// ordinary response.
    pub async fn get_response_for<A: AccessAuthority>(
        &self,
        path: &str,
        access: &A,
    ) -> StoreResult<AssetResponse> {
        let verdict = self.resolve(path, access).await?;
        self.respond(&verdict, path, access).await
    }

    /// Serve a rewritten canonical key. Rewrites always target live
    /// content, which lives in the public tree.
    async fn serve_public(&self, key: &str) -> StoreResult<AssetResponse> {
        match self.blobs.read(key, Visibility::Public).await? {
            Some(body) => Ok(AssetResponse::ok(key, body)),
            None => Ok(AssetResponse::not_found()),
        }
    }

    /// Serve a raw request path unmodified, with the store's own existence
    /// and access checks.
    async fn serve_raw<A: AccessAuthority>(
        &self,
        path: &str,
        access: &A,
    ) -> StoreResult<AssetResponse> {
        // Raw paths that are not valid keys, or that name the protected
        // tree directly, simply do not exist as far as callers can tell.
        if !is_safe_key(path) || path.split('/').next() == Some(PROTECTED_DIR) {
            return Ok(AssetResponse::not_found());
        }

        if let Some(body) = self.blobs.read(path, Visibility::Public).await? {
            return Ok(AssetResponse::ok(path, body));
        }

        if self.blobs.contains(path, Visibility::Protected) {
            if self.may_view_protected(path, access).await? {
                if let Some(body) = self.blobs.read(path, Visibility::Protected).await? {
                    return Ok(AssetResponse::ok(path, body));
                }
            }
            return Ok(AssetResponse::denied(self.denied_status));
        }

        Ok(AssetResponse::not_found())
    }

    /// Whether this request may see a protected blob addressed by its raw
    /// key: authenticated callers always, anonymous callers only with a
    /// grant matching the key's fingerprint.
    async fn may_view_protected<A: AccessAuthority>(
        &self,
        path: &str,
        access: &A,
    ) -> StoreResult<bool> {
        if access.is_authenticated() {
            return Ok(true);
        }

        let Some(parsed) = parse_file_id(path, self.legacy_filenames) else {
            return Ok(false);
        };
        if !parsed.has_hash() {
            return Ok(false);
        }

        let filename = parsed.file_name();
        if let Some(file) = self.repo.find_logical_file(&filename, Stage::Draft).await? {
            for full_hash in file.hashes_matching(&parsed.hash) {
                if access.has_grant(&filename, full_hash) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests;
