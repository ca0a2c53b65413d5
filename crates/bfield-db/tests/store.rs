//! Integration tests for the `bfield-db` data layer.
//!
//! Every test runs against a private in-memory `SQLite` database, so the
//! suite needs no external services and runs during normal `cargo test`.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::indexing_slicing
)]

use std::time::Duration;

use bfield_db::{Database, DbError, EventStore};
use bfield_types::{EventDraft, EventId};

/// Connect to a fresh in-memory database with the schema applied.
async fn setup() -> Database {
    let db = Database::connect_in_memory()
        .await
        .expect("failed to open in-memory SQLite");
    db.init_schema().await.expect("failed to create schema");
    db
}

fn draft(name: &str, place: Option<&str>, thing: Option<&str>) -> EventDraft {
    EventDraft::new(
        Some(name.to_owned()),
        place.map(str::to_owned),
        thing.map(str::to_owned),
    )
}

// =============================================================================
// Create / find
// =============================================================================

#[tokio::test]
async fn create_then_find_returns_same_fields() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let created = store
        .create(&draft("jason", Some("home"), Some("rust")))
        .await
        .unwrap();

    let found = store.find(created.id).await.unwrap();
    assert_eq!(found.name, "jason");
    assert_eq!(found.place.as_deref(), Some("home"));
    assert_eq!(found.thing.as_deref(), Some("rust"));
    assert_eq!(found.created_at, created.created_at);
    assert_eq!(found.updated_at, created.updated_at);
}

#[tokio::test]
async fn create_assigns_distinct_ids() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let a = store.create(&draft("a", None, None)).await.unwrap();
    let b = store.create(&draft("b", None, None)).await.unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn create_trims_the_name() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let created = store.create(&draft("  jason  ", None, None)).await.unwrap();
    assert_eq!(created.name, "jason");
}

#[tokio::test]
async fn find_unknown_id_is_not_found() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let err = store.find(EventId::new()).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn create_with_blank_name_is_rejected_and_persists_nothing() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let err = store.create(&EventDraft::default()).await.unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));

    let err = store
        .create(&draft("   ", Some("home"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn update_with_blank_name_is_rejected() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let created = store.create(&draft("jason", None, None)).await.unwrap();
    let err = store
        .update(created.id, &EventDraft::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));

    // The record is untouched.
    let found = store.find(created.id).await.unwrap();
    assert_eq!(found.name, "jason");
    assert_eq!(found.updated_at, created.updated_at);
}

// =============================================================================
// Listing and ordering
// =============================================================================

#[tokio::test]
async fn list_orders_by_most_recently_updated_first() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let first = store.create(&draft("first", None, None)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = store.create(&draft("second", None, None)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let third = store.create(&draft("third", None, None)).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].id, third.id);
    assert_eq!(listed[1].id, second.id);
    assert_eq!(listed[2].id, first.id);

    // Updating the oldest record moves it to the front.
    tokio::time::sleep(Duration::from_millis(5)).await;
    store
        .update(first.id, &draft("first", Some("front"), None))
        .await
        .unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed[0].id, first.id);
}

#[tokio::test]
async fn latest_tracks_the_most_recent_write() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    assert!(store.latest().await.unwrap().is_none());

    let a = store.create(&draft("a", None, None)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let b = store.create(&draft("b", None, None)).await.unwrap();

    assert_eq!(store.latest().await.unwrap().unwrap().id, b.id);

    tokio::time::sleep(Duration::from_millis(5)).await;
    store.update(a.id, &draft("a", None, None)).await.unwrap();
    assert_eq!(store.latest().await.unwrap().unwrap().id, a.id);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn update_replaces_fields_and_advances_updated_at() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let created = store
        .create(&draft("jason", Some("home"), Some("rust")))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let updated = store
        .update(created.id, &draft("mason", Some("work"), None))
        .await
        .unwrap();

    assert_eq!(updated.name, "mason");
    assert_eq!(updated.place.as_deref(), Some("work"));
    assert_eq!(updated.thing, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let found = store.find(created.id).await.unwrap();
    assert_eq!(found, updated);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    let err = store
        .update(EventId::new(), &draft("ghost", None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

// =============================================================================
// Count / delete_all
// =============================================================================

#[tokio::test]
async fn count_and_delete_all() {
    let db = setup().await;
    let store = EventStore::new(db.pool());

    for name in ["a", "b", "c"] {
        store.create(&draft(name, None, None)).await.unwrap();
    }
    assert_eq!(store.count().await.unwrap(), 3);

    store.delete_all().await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.list().await.unwrap().is_empty());
}
