//! Integration tests for the `LibraryStore` facade

mod test_helpers;

use test_helpers::*;
use tunebox_core::{CreateSong, LibraryStore, UserId};

#[tokio::test]
async fn test_store_round_trip_through_trait() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let owner = UserId::new("alice");

    let song = store
        .create_song(CreateSong::new("Song", "Artist", "uploads/s.mp3", owner.clone()))
        .await
        .unwrap();
    let playlist = store.create_playlist("Mix", &owner).await.unwrap();
    let playlist = store.add_playlist_song(&playlist.id, &song.id).await.unwrap();
    assert!(playlist.contains(&song.id));

    store.create_favorite(&owner, &song.id).await.unwrap();
    assert_eq!(store.list_favorite_songs(&owner).await.unwrap().len(), 1);
    assert_eq!(store.list_playlists(&owner).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reset_removes_everything() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let pool = test_db.pool();
    let owner = UserId::new("alice");

    let song = create_test_song(pool, "Song", &owner).await;
    let playlist = create_test_playlist(pool, "Mix", &owner).await;
    store.add_playlist_song(&playlist.id, &song.id).await.unwrap();
    store.create_favorite(&owner, &song.id).await.unwrap();

    store.reset().await.unwrap();

    for table in ["songs", "playlists", "playlist_songs", "favorites"] {
        assert_eq!(count_rows(pool, table).await, 0, "{} not empty", table);
    }
}

#[tokio::test]
async fn test_connect_runs_migrations() {
    let temp_dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("fresh.db").display());

    let store = tunebox_storage::connect(&url).await.unwrap();

    assert!(store.list_songs().await.unwrap().is_empty());
}
