//! End-to-end serving scenarios over a real catalog and blob trees.

use camino::Utf8PathBuf;
use tempfile::{tempdir, TempDir};

use strata_catalog::Catalog;
use strata_core::types::version::short_hash;
use strata_resolver::KeyBuilder;

use crate::blob::{FilesystemStore, Visibility};
use crate::digest::content_digest;
use crate::grant::SessionAccess;
use crate::serve::AssetStore;

const FILE: &str = "docs/sub/guide.txt";
const V1: &[u8] = b"guide - version 1";
const V2: &[u8] = b"guide - version 2";

fn test_store(denied_status: u16) -> (TempDir, AssetStore<Catalog>) {
    let dir = tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().join("assets")).unwrap();
    let blobs = FilesystemStore::new(root).unwrap();
    (dir, AssetStore::new(Catalog::new(), blobs, false, denied_status))
}

/// Record a new draft revision and place its blob in the protected tree.
fn save_draft(store: &AssetStore<Catalog>, filename: &str, body: &[u8]) -> String {
    let digest = content_digest(body);
    store.repo().record(filename, &digest);
    let key = store.keys().build_key(filename, &digest, None);
    store.blobs().put(&key, body, Visibility::Protected).unwrap();
    digest
}

/// Publish the latest draft: flip the catalog and move the blob public,
/// dropping the previously live blob.
fn publish(store: &AssetStore<Catalog>, filename: &str) -> String {
    let previous = store.repo().live_version(filename);
    let version = store.repo().publish(filename).expect("publish of unknown file");

    if let Some(previous) = previous {
        if previous.content_hash != version.content_hash {
            let old_key = store
                .keys()
                .build_key(filename, &previous.content_hash, None);
            store.blobs().remove(&old_key, Visibility::Public).unwrap();
        }
    }

    let key = store.keys().build_key(filename, &version.content_hash, None);
    if store.blobs().contains(&key, Visibility::Protected) {
        store.blobs().promote(&key).unwrap();
    }
    version.content_hash
}

/// Archive a file: drop its catalog record and every stored blob.
fn archive(store: &AssetStore<Catalog>, filename: &str) {
    if let Some(record) = store.repo().get(filename) {
        for version in &record.versions {
            let key = store.keys().build_key(filename, &version.content_hash, None);
            store.blobs().remove(&key, Visibility::Public).unwrap();
            store.blobs().remove(&key, Visibility::Protected).unwrap();
        }
    }
    store.repo().archive(filename);
}

fn hash_path(filename: &str, digest: &str) -> String {
    let (folder, name) = match filename.rfind('/') {
        Some(i) => (&filename[..=i], &filename[i + 1..]),
        None => ("", filename),
    };
    format!("{folder}{}/{name}", short_hash(digest))
}

#[tokio::test]
async fn test_published_file_served_by_hash_and_legacy_urls() {
    let (_dir, store) = test_store(403);
    save_draft(&store, FILE, V1);
    let digest = publish(&store, FILE);

    let anon = SessionAccess::anonymous();

    let response = store
        .get_response_for(&hash_path(FILE, &digest), &anon)
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, V1);

    let response = store.get_response_for(FILE, &anon).await.unwrap();
    assert_eq!(response.status, 200, "legacy URL should serve published content");
    assert_eq!(response.body, V1);
}

#[tokio::test]
async fn test_draft_file_access() {
    let (_dir, store) = test_store(403);
    let digest = save_draft(&store, FILE, V1);
    let path = hash_path(FILE, &digest);

    let anon = SessionAccess::anonymous();

    let response = store.get_response_for(&path, &anon).await.unwrap();
    assert_eq!(response.status, 403, "draft must not be visible anonymously");

    let response = store.get_response_for(FILE, &anon).await.unwrap();
    assert_eq!(response.status, 404, "draft must not be visible via legacy URL");

    // A grant on the full digest opens the hash URL...
    let granted = SessionAccess::anonymous();
    granted.grants().grant(FILE, &digest);
    let response = store.get_response_for(&path, &granted).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, V1);

    // ...but never the legacy URL.
    let response = store.get_response_for(FILE, &granted).await.unwrap();
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_precomputed_verdict_serves_same_response() {
    let (_dir, store) = test_store(403);
    save_draft(&store, FILE, V1);
    let stale_digest = publish(&store, FILE);
    save_draft(&store, FILE, V2);
    let live_digest = publish(&store, FILE);

    // Request the superseded fingerprint: the verdict rewrites to the
    // live key, and serving that verdict matches the one-shot path.
    let path = hash_path(FILE, &stale_digest);
    let anon = SessionAccess::anonymous();

    let verdict = store.resolve(&path, &anon).await.unwrap();
    assert_eq!(
        verdict,
        strata_core::types::Verdict::RewriteTo(store.keys().build_key(FILE, &live_digest, None))
    );

    let replayed = store.respond(&verdict, &path, &anon).await.unwrap();
    let direct = store.get_response_for(&path, &anon).await.unwrap();
    assert_eq!(replayed, direct);
    assert_eq!(replayed.status, 200);
    assert_eq!(replayed.body, V2);
}

#[tokio::test]
async fn test_authenticated_caller_reaches_draft_directly() {
    let (_dir, store) = test_store(403);
    let digest = save_draft(&store, FILE, V1);

    let response = store
        .get_response_for(&hash_path(FILE, &digest), &SessionAccess::authenticated())
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, V1);
}

#[tokio::test]
async fn test_published_file_with_newer_draft() {
    let (_dir, store) = test_store(403);
    save_draft(&store, FILE, V1);
    let live_digest = publish(&store, FILE);
    let draft_digest = save_draft(&store, FILE, V2);

    let anon = SessionAccess::anonymous();

    // The live fingerprint and the legacy URL both serve live content.
    let response = store
        .get_response_for(&hash_path(FILE, &live_digest), &anon)
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, V1);

    let response = store.get_response_for(FILE, &anon).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, V1);

    // The draft fingerprint is forbidden without a grant.
    let draft_path = hash_path(FILE, &draft_digest);
    let response = store.get_response_for(&draft_path, &anon).await.unwrap();
    assert_eq!(response.status, 403);

    let granted = SessionAccess::anonymous();
    granted.grants().grant(FILE, &draft_digest);
    let response = store.get_response_for(&draft_path, &granted).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, V2);
}

#[tokio::test]
async fn test_archived_file_is_gone() {
    let (_dir, store) = test_store(403);
    save_draft(&store, FILE, V1);
    let digest = publish(&store, FILE);
    archive(&store, FILE);

    let path = hash_path(FILE, &digest);
    let anon = SessionAccess::anonymous();

    let response = store.get_response_for(&path, &anon).await.unwrap();
    assert_eq!(response.status, 404, "archived file should 404 by hash");

    let response = store.get_response_for(FILE, &anon).await.unwrap();
    assert_eq!(response.status, 404, "archived file should 404 via legacy URL");

    // Even a grant cannot bring back an archived file.
    let granted = SessionAccess::anonymous();
    granted.grants().grant(FILE, &digest);
    let response = store.get_response_for(&path, &granted).await.unwrap();
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_stale_fingerprint_serves_current_live_after_republish() {
    let (_dir, store) = test_store(403);
    save_draft(&store, FILE, V1);
    let old_digest = publish(&store, FILE);
    save_draft(&store, FILE, V2);
    let new_digest = publish(&store, FILE);
    assert_ne!(old_digest, new_digest);

    // The stale fingerprint now serves the new live content.
    let stale_path = hash_path(FILE, &old_digest);
    let response = store
        .get_response_for(&stale_path, &SessionAccess::anonymous())
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, V2);

    // An authenticated request passes through unchanged, and the exact old
    // key no longer exists in the store.
    let response = store
        .get_response_for(&stale_path, &SessionAccess::authenticated())
        .await
        .unwrap();
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_denied_status_can_collapse_to_404() {
    let (_dir, store) = test_store(404);
    let digest = save_draft(&store, FILE, V1);

    let response = store
        .get_response_for(&hash_path(FILE, &digest), &SessionAccess::anonymous())
        .await
        .unwrap();
    assert_eq!(response.status, 404, "a production store may hide denials entirely");
}

#[tokio::test]
async fn test_unparseable_path_is_served_raw_from_the_public_tree() {
    let (_dir, store) = test_store(403);
    // A dangling variant separator matches neither grammar.
    store
        .blobs()
        .put("theme__.css", b"body {}", Visibility::Public)
        .unwrap();

    let response = store
        .get_response_for("theme__.css", &SessionAccess::anonymous())
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"body {}");

    let response = store
        .get_response_for("missing__.css", &SessionAccess::anonymous())
        .await
        .unwrap();
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_protected_tree_is_not_reachable_by_raw_path() {
    let (_dir, store) = test_store(403);
    let digest = save_draft(&store, FILE, V1);
    let raw = format!(".protected/{}", hash_path(FILE, &digest));

    let response = store
        .get_response_for(&raw, &SessionAccess::authenticated())
        .await
        .unwrap();
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_response_headers() {
    let (_dir, store) = test_store(403);
    save_draft(&store, FILE, V1);
    let digest = publish(&store, FILE);

    let response = store
        .get_response_for(&hash_path(FILE, &digest), &SessionAccess::anonymous())
        .await
        .unwrap();
    assert!(response
        .headers
        .contains(&("Content-Type".to_string(), "text/plain".to_string())));
    assert!(response
        .headers
        .contains(&("Content-Length".to_string(), V1.len().to_string())));
}
