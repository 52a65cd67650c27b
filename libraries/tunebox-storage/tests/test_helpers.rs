//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to exercise migrations, constraints and indexes as they run in production.

#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;
use tunebox_core::{CreateSong, Playlist, Song, UserId};
use tunebox_storage::SqliteLibraryStore;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = tunebox_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        tunebox_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Store facade over the same pool
    pub fn store(&self) -> SqliteLibraryStore {
        SqliteLibraryStore::new(self.pool.clone())
    }
}

/// Test fixture: Create a song owned by `owner`
pub async fn create_test_song(pool: &SqlitePool, title: &str, owner: &UserId) -> Song {
    tunebox_storage::songs::create(
        pool,
        CreateSong::new(
            title,
            "Test Artist",
            format!("uploads/{}.mp3", title.to_lowercase().replace(' ', "-")),
            owner.clone(),
        ),
    )
    .await
    .expect("Failed to create test song")
}

/// Test fixture: Create an empty playlist owned by `owner`
pub async fn create_test_playlist(pool: &SqlitePool, name: &str, owner: &UserId) -> Playlist {
    tunebox_storage::playlists::create(pool, name, owner)
        .await
        .expect("Failed to create test playlist")
}

/// Count rows in `table`
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
