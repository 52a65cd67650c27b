//! Library Store contract
//!
//! Persistence facade for songs, playlists and favorites. Implementations
//! carry storage mechanics and schema-level validation only; ownership and
//! every multi-record policy live in the consistency engine.

use crate::error::Result;
use crate::types::{
    CreateSong, Favorite, Playlist, PlaylistId, PlaylistWithSongs, Song, SongId, UpdateSong,
    UserId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of removing every reference to a song
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachReport {
    /// Playlists whose membership list lost the song
    pub playlists_updated: u64,
    /// Favorite records removed (any user, any status)
    pub favorites_removed: u64,
}

/// Storage operations over the library records
#[async_trait]
pub trait LibraryStore: Send + Sync {
    // ========================================================================
    // Songs
    // ========================================================================

    /// Insert a new song.
    ///
    /// Fails with `InvalidArgument` if title, artist, file reference or owner
    /// is empty.
    async fn create_song(&self, song: CreateSong) -> Result<Song>;

    /// Get song by ID
    async fn get_song(&self, id: &SongId) -> Result<Option<Song>>;

    /// All songs, oldest first
    async fn list_songs(&self) -> Result<Vec<Song>>;

    /// Apply a partial update; fails with `NotFound` for unknown ids
    async fn update_song(&self, id: &SongId, update: UpdateSong) -> Result<Song>;

    /// Pull the song from every playlist and delete every favorite that
    /// references it. Idempotent.
    async fn detach_song(&self, id: &SongId) -> Result<DetachReport>;

    /// Delete the song record, re-running the detach in the same
    /// transaction. Returns whether a record was removed.
    async fn delete_song(&self, id: &SongId) -> Result<bool>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create an empty playlist
    async fn create_playlist(&self, name: &str, owner: &UserId) -> Result<Playlist>;

    /// Get playlist (with membership list) by ID
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Get playlist with members resolved to song records
    async fn get_playlist_with_songs(&self, id: &PlaylistId) -> Result<Option<PlaylistWithSongs>>;

    /// Playlists owned by `owner`, oldest first
    async fn list_playlists(&self, owner: &UserId) -> Result<Vec<Playlist>>;

    /// Append a song to the membership list.
    ///
    /// Fails with `Conflict` if the song is already a member.
    async fn add_playlist_song(&self, playlist: &PlaylistId, song: &SongId) -> Result<Playlist>;

    /// Remove a song from the membership list; returns whether it was a member
    async fn remove_playlist_song(&self, playlist: &PlaylistId, song: &SongId) -> Result<bool>;

    /// Delete the playlist record only
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<bool>;

    // ========================================================================
    // Favorites
    // ========================================================================

    /// The active favorite for (user, song), if any
    async fn find_active_favorite(&self, user: &UserId, song: &SongId)
        -> Result<Option<Favorite>>;

    /// Create an active favorite.
    ///
    /// Fails with `Conflict` if an active favorite already exists.
    async fn create_favorite(&self, user: &UserId, song: &SongId) -> Result<Favorite>;

    /// Mark the active favorite for (user, song) removed; returns whether one existed
    async fn remove_favorite(&self, user: &UserId, song: &SongId) -> Result<bool>;

    /// Songs the user has actively favorited, in the order they were favorited
    async fn list_favorite_songs(&self, user: &UserId) -> Result<Vec<Song>>;

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Remove every record
    async fn reset(&self) -> Result<()>;
}
