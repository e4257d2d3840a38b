//! Catalog behavior tests.

use strata_core::types::Stage;
use strata_resolver::VersionRepository;

use super::Catalog;

const HASH_V1: &str = "0123456789abcdef0123456789abcdef01234567";
const HASH_V2: &str = "fedcba9876543210fedcba9876543210fedcba98";

#[test]
fn test_record_assigns_monotonic_version_ids() {
    let catalog = Catalog::new();
    assert_eq!(catalog.record("a/b.txt", HASH_V1), 1);
    assert_eq!(catalog.record("a/b.txt", HASH_V1), 2);
    assert_eq!(catalog.record("a/b.txt", HASH_V2), 3);
    assert_eq!(catalog.record("other.txt", HASH_V1), 1);
}

#[test]
fn test_publish_flips_latest_and_sets_live() {
    let catalog = Catalog::new();
    catalog.record("a/b.txt", HASH_V1);
    catalog.record("a/b.txt", HASH_V2);

    let published = catalog.publish("a/b.txt").unwrap();
    assert_eq!(published.version_id, 2);
    assert!(published.was_published);

    let record = catalog.get("a/b.txt").unwrap();
    assert_eq!(record.live, Some(2));
    assert!(!record.versions[0].was_published);

    assert!(catalog.publish("unknown.txt").is_none());
}

#[test]
fn test_unpublish_keeps_history() {
    let catalog = Catalog::new();
    catalog.record("a/b.txt", HASH_V1);
    catalog.publish("a/b.txt");

    assert_eq!(catalog.unpublish("a/b.txt"), Some(1));
    let record = catalog.get("a/b.txt").unwrap();
    assert_eq!(record.live, None);
    // History still records the publication.
    assert!(record.versions[0].was_published);
}

#[test]
fn test_archive_removes_everything() {
    let catalog = Catalog::new();
    catalog.record("a/b.txt", HASH_V1);
    catalog.publish("a/b.txt");

    assert!(catalog.archive("a/b.txt"));
    assert!(!catalog.archive("a/b.txt"));
    assert!(catalog.get("a/b.txt").is_none());
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_find_logical_file_per_stage() {
    let catalog = Catalog::new();
    catalog.record("a/b.txt", HASH_V1);
    catalog.publish("a/b.txt");
    catalog.record("a/b.txt", HASH_V2);

    let draft = catalog
        .find_logical_file("a/b.txt", Stage::Draft)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(draft.content_hash, HASH_V2);
    assert_eq!(draft.version_id, 2);
    assert_eq!(draft.versions.len(), 2);

    let live = catalog
        .find_logical_file("a/b.txt", Stage::Live)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live.content_hash, HASH_V1);
    assert_eq!(live.version_id, 1);

    assert!(catalog
        .find_logical_file("missing.txt", Stage::Live)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_draft_only_file_has_no_live_state() {
    let catalog = Catalog::new();
    catalog.record("a/b.txt", HASH_V1);

    assert!(catalog
        .find_logical_file("a/b.txt", Stage::Live)
        .await
        .unwrap()
        .is_none());
    assert!(catalog
        .find_logical_file("a/b.txt", Stage::Draft)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_find_published_version_picks_highest_match() {
    let catalog = Catalog::new();
    catalog.record("a/b.txt", HASH_V1);
    catalog.publish("a/b.txt");
    catalog.record("a/b.txt", HASH_V1);
    catalog.publish("a/b.txt");
    catalog.record("a/b.txt", HASH_V2);

    let found = catalog
        .find_published_version("a/b.txt", &HASH_V1[..10])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.version_id, 2);

    // The unpublished draft never matches.
    assert!(catalog
        .find_published_version("a/b.txt", &HASH_V2[..10])
        .await
        .unwrap()
        .is_none());

    // An empty prefix marks a legacy request and matches nothing.
    assert!(catalog
        .find_published_version("a/b.txt", "")
        .await
        .unwrap()
        .is_none());
}

#[test]
fn test_filenames_are_sorted() {
    let catalog = Catalog::new();
    catalog.record("z.txt", HASH_V1);
    catalog.record("a.txt", HASH_V1);
    assert_eq!(catalog.filenames(), vec!["a.txt", "z.txt"]);
    assert_eq!(catalog.len(), 2);
}
