use crate::{favorites, playlists, songs};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tunebox_core::{
    CreateSong, DetachReport, Favorite, LibraryStore, Playlist, PlaylistId, PlaylistWithSongs,
    Result, Song, SongId, UpdateSong, UserId,
};

/// Library Store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteLibraryStore {
    pool: SqlitePool,
}

impl SqliteLibraryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LibraryStore for SqliteLibraryStore {
    // Songs
    async fn create_song(&self, song: CreateSong) -> Result<Song> {
        songs::create(&self.pool, song).await
    }

    async fn get_song(&self, id: &SongId) -> Result<Option<Song>> {
        songs::get_by_id(&self.pool, id).await
    }

    async fn list_songs(&self) -> Result<Vec<Song>> {
        songs::get_all(&self.pool).await
    }

    async fn update_song(&self, id: &SongId, update: UpdateSong) -> Result<Song> {
        songs::update(&self.pool, id, update).await
    }

    async fn detach_song(&self, id: &SongId) -> Result<DetachReport> {
        songs::detach(&self.pool, id).await
    }

    async fn delete_song(&self, id: &SongId) -> Result<bool> {
        songs::delete(&self.pool, id).await
    }

    // Playlists
    async fn create_playlist(&self, name: &str, owner: &UserId) -> Result<Playlist> {
        playlists::create(&self.pool, name, owner).await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn get_playlist_with_songs(&self, id: &PlaylistId) -> Result<Option<PlaylistWithSongs>> {
        playlists::get_with_songs(&self.pool, id).await
    }

    async fn list_playlists(&self, owner: &UserId) -> Result<Vec<Playlist>> {
        playlists::get_user_playlists(&self.pool, owner).await
    }

    async fn add_playlist_song(&self, playlist: &PlaylistId, song: &SongId) -> Result<Playlist> {
        playlists::add_song(&self.pool, playlist, song).await
    }

    async fn remove_playlist_song(&self, playlist: &PlaylistId, song: &SongId) -> Result<bool> {
        playlists::remove_song(&self.pool, playlist, song).await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<bool> {
        playlists::delete(&self.pool, id).await
    }

    // Favorites
    async fn find_active_favorite(
        &self,
        user: &UserId,
        song: &SongId,
    ) -> Result<Option<Favorite>> {
        favorites::find_active(&self.pool, user, song).await
    }

    async fn create_favorite(&self, user: &UserId, song: &SongId) -> Result<Favorite> {
        favorites::create(&self.pool, user, song).await
    }

    async fn remove_favorite(&self, user: &UserId, song: &SongId) -> Result<bool> {
        favorites::remove(&self.pool, user, song).await
    }

    async fn list_favorite_songs(&self, user: &UserId) -> Result<Vec<Song>> {
        favorites::get_user_favorite_songs(&self.pool, user).await
    }

    // Maintenance
    async fn reset(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for table in ["favorites", "playlist_songs", "playlists", "songs"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        tracing::info!("Library reset: all songs, playlists and favorites removed");
        Ok(())
    }
}
