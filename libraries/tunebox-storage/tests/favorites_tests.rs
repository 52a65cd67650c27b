//! Integration tests for favorites vertical slice
//!
//! Tests favorite operations including:
//! - Active uniqueness per (user, song)
//! - Soft removal and re-adding
//! - Listing favorite songs

mod test_helpers;

use test_helpers::*;
use tunebox_core::{ErrorKind, FavoriteStatus, SongId, UserId};

#[tokio::test]
async fn test_create_and_find_favorite() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let alice = UserId::new("alice");
    let song = create_test_song(pool, "Loved", &alice).await;

    let favorite = tunebox_storage::favorites::create(pool, &alice, &song.id)
        .await
        .unwrap();
    assert_eq!(favorite.status, FavoriteStatus::Active);

    let found = tunebox_storage::favorites::find_active(pool, &alice, &song.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, favorite.id);

    // Favorites are per user
    let bob = UserId::new("bob");
    assert!(tunebox_storage::favorites::find_active(pool, &bob, &song.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_active_favorite_is_conflict() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let alice = UserId::new("alice");
    let song = create_test_song(pool, "Loved", &alice).await;

    tunebox_storage::favorites::create(pool, &alice, &song.id).await.unwrap();
    let err = tunebox_storage::favorites::create(pool, &alice, &song.id)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_favorite_unknown_song_is_not_found() {
    let test_db = TestDb::new().await;

    let err = tunebox_storage::favorites::create(
        test_db.pool(),
        &UserId::new("alice"),
        &SongId::generate(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_remove_then_add_again() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let alice = UserId::new("alice");
    let song = create_test_song(pool, "Fickle", &alice).await;

    let first = tunebox_storage::favorites::create(pool, &alice, &song.id).await.unwrap();
    assert!(tunebox_storage::favorites::remove(pool, &alice, &song.id).await.unwrap());
    assert!(tunebox_storage::favorites::find_active(pool, &alice, &song.id)
        .await
        .unwrap()
        .is_none());

    // Removing again finds nothing active
    assert!(!tunebox_storage::favorites::remove(pool, &alice, &song.id).await.unwrap());

    let second = tunebox_storage::favorites::create(pool, &alice, &song.id).await.unwrap();
    assert_ne!(first.id, second.id);

    // The removed record is kept as history
    assert_eq!(count_rows(pool, "favorites").await, 2);
}

#[tokio::test]
async fn test_list_favorite_songs() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");

    let a = create_test_song(pool, "A", &alice).await;
    let b = create_test_song(pool, "B", &alice).await;
    let c = create_test_song(pool, "C", &bob).await;

    tunebox_storage::favorites::create(pool, &alice, &c.id).await.unwrap();
    tunebox_storage::favorites::create(pool, &alice, &a.id).await.unwrap();
    tunebox_storage::favorites::create(pool, &alice, &b.id).await.unwrap();
    tunebox_storage::favorites::remove(pool, &alice, &a.id).await.unwrap();
    tunebox_storage::favorites::create(pool, &bob, &a.id).await.unwrap();

    let songs = tunebox_storage::favorites::get_user_favorite_songs(pool, &alice)
        .await
        .unwrap();
    let titles: Vec<_> = songs.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["C", "B"]);
}
