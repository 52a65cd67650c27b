//! Consistency Engine
//!
//! Every mutation of the library goes through [`LibraryService`]: it checks
//! ownership, enforces the uniqueness rules for favorites and playlist
//! membership, and runs the multi-step song deletion.

use crate::files::{generate_file_name, FileStore};
use crate::locks::KeyedLocks;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tunebox_core::{
    CoreError, CreateSong, Favorite, LibraryStore, Playlist, PlaylistId, PlaylistWithSongs,
    Result, Song, SongId, UpdateSong, UserId, UNKNOWN_ARTIST,
};

/// An uploaded audio file plus the optional metadata sent with it
#[derive(Debug, Clone, Default)]
pub struct SongUpload {
    /// Name of the file on the uploader's machine
    pub original_name: String,
    pub bytes: Vec<u8>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<f64>,
}

/// What a song deletion touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub playlists_updated: u64,
    pub favorites_removed: u64,
    /// False when the best-effort file deletion failed
    pub file_removed: bool,
}

/// Policy layer over a [`LibraryStore`] and a [`FileStore`]
#[derive(Clone)]
pub struct LibraryService {
    store: Arc<dyn LibraryStore>,
    files: Arc<dyn FileStore>,
    locks: Arc<KeyedLocks>,
}

fn playlist_lock(id: &PlaylistId) -> String {
    format!("playlist:{}", id)
}

fn favorite_lock(user: &UserId, song: &SongId) -> String {
    format!("favorite:{}:{}", user, song)
}

/// Trimmed value, or `None` when absent or blank
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl LibraryService {
    pub fn new(store: Arc<dyn LibraryStore>, files: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            files,
            locks: Arc::new(KeyedLocks::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn LibraryStore> {
        &self.store
    }

    // ========================================================================
    // Songs
    // ========================================================================

    /// Every song, oldest first. Not scoped to the caller.
    pub async fn list_songs(&self) -> Result<Vec<Song>> {
        self.store.list_songs().await
    }

    async fn require_song(&self, id: &SongId) -> Result<Song> {
        self.store
            .get_song(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Song", id.as_str()))
    }

    async fn require_owned_song(&self, caller: &UserId, id: &SongId) -> Result<Song> {
        let song = self.require_song(id).await?;
        if !song.is_owned_by(caller) {
            return Err(CoreError::unauthorized("Only the owner can modify this song"));
        }
        Ok(song)
    }

    /// Store the uploaded bytes and create the song record.
    ///
    /// Title falls back to the original file name and artist to
    /// [`UNKNOWN_ARTIST`]. If the record cannot be created the stored bytes
    /// are removed again.
    pub async fn upload_song(&self, caller: &UserId, upload: SongUpload) -> Result<Song> {
        let original_name = upload.original_name.trim().to_string();
        if original_name.is_empty() || upload.bytes.is_empty() {
            return Err(CoreError::invalid_argument("No audio file uploaded"));
        }
        if let Some(duration) = upload.duration {
            if !duration.is_finite() || duration < 0.0 {
                return Err(CoreError::invalid_argument("Duration must be a non-negative number"));
            }
        }

        let file_name = generate_file_name(&original_name);
        let reference = self.files.save(&file_name, &upload.bytes).await?;

        let mut create = CreateSong::new(
            non_blank(upload.title).unwrap_or_else(|| original_name.clone()),
            non_blank(upload.artist).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            reference.clone(),
            caller.clone(),
        );
        create.album = non_blank(upload.album);
        create.duration = upload.duration;

        match self.store.create_song(create).await {
            Ok(song) => {
                info!(song_id = %song.id, owner = %caller, file = %reference, "Song uploaded");
                Ok(song)
            }
            Err(e) => {
                if let Err(cleanup) = self.files.delete(&reference).await {
                    warn!(file = %reference, error = %cleanup, "Failed to remove orphaned upload");
                }
                Err(e)
            }
        }
    }

    /// Update title and/or artist (owner only); supplied values are trimmed
    pub async fn update_song(
        &self,
        caller: &UserId,
        id: &SongId,
        update: UpdateSong,
    ) -> Result<Song> {
        let song = self.require_owned_song(caller, id).await?;
        if update.is_empty() {
            return Ok(song);
        }

        let song = self.store.update_song(id, update.trimmed()).await?;
        debug!(song_id = %id, "Song updated");
        Ok(song)
    }

    /// Delete a song (owner only) and everything that references it.
    ///
    /// Steps run in order and each is safe to repeat: detach from every
    /// playlist and favorite, delete the file (failure is logged only),
    /// then delete the record together with any reference that slipped in
    /// after the detach.
    pub async fn delete_song(&self, caller: &UserId, id: &SongId) -> Result<DeleteReport> {
        let song = self.require_owned_song(caller, id).await?;

        let detached = self.store.detach_song(id).await?;

        let file_removed = match self.files.delete(&song.file_path).await {
            Ok(()) => true,
            Err(e) => {
                warn!(song_id = %id, file = %song.file_path, error = %e, "File delete warning");
                false
            }
        };

        if !self.store.delete_song(id).await? {
            // Lost a race with another delete of the same song
            return Err(CoreError::not_found("Song", id.as_str()));
        }

        let report = DeleteReport {
            playlists_updated: detached.playlists_updated,
            favorites_removed: detached.favorites_removed,
            file_removed,
        };
        info!(
            song_id = %id,
            playlists = report.playlists_updated,
            favorites = report.favorites_removed,
            file_removed = report.file_removed,
            "Song deleted"
        );
        Ok(report)
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Songs the caller has favorited
    pub async fn list_favorites(&self, caller: &UserId) -> Result<Vec<Song>> {
        self.store.list_favorite_songs(caller).await
    }

    /// Favorite a song; `Conflict` if it already is one
    pub async fn add_favorite(&self, caller: &UserId, song_id: &SongId) -> Result<Favorite> {
        let _guard = self.locks.acquire(favorite_lock(caller, song_id)).await;

        self.require_song(song_id).await?;

        if self.store.find_active_favorite(caller, song_id).await?.is_some() {
            return Err(CoreError::conflict("Song already in favorites"));
        }

        let favorite = self.store.create_favorite(caller, song_id).await?;
        debug!(user = %caller, song_id = %song_id, "Favorite added");
        Ok(favorite)
    }

    /// Drop the caller's active favorite; `NotFound` if there is none
    pub async fn remove_favorite(&self, caller: &UserId, song_id: &SongId) -> Result<()> {
        let _guard = self.locks.acquire(favorite_lock(caller, song_id)).await;

        if !self.store.remove_favorite(caller, song_id).await? {
            return Err(CoreError::not_found("Favorite", song_id.as_str()));
        }

        debug!(user = %caller, song_id = %song_id, "Favorite removed");
        Ok(())
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    /// The caller's playlists with their membership lists
    pub async fn list_playlists(&self, caller: &UserId) -> Result<Vec<Playlist>> {
        self.store.list_playlists(caller).await
    }

    async fn require_owned_playlist(&self, caller: &UserId, id: &PlaylistId) -> Result<Playlist> {
        let playlist = self
            .store
            .get_playlist(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Playlist", id.as_str()))?;
        if !playlist.is_owned_by(caller) {
            return Err(CoreError::unauthorized("Only the owner can modify this playlist"));
        }
        Ok(playlist)
    }

    /// One of the caller's playlists with members expanded to songs
    pub async fn get_playlist(&self, caller: &UserId, id: &PlaylistId) -> Result<PlaylistWithSongs> {
        let playlist = self
            .store
            .get_playlist_with_songs(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Playlist", id.as_str()))?;
        if !playlist.playlist.is_owned_by(caller) {
            return Err(CoreError::unauthorized("Playlist belongs to another user"));
        }
        Ok(playlist)
    }

    /// Create an empty playlist owned by the caller
    pub async fn create_playlist(&self, caller: &UserId, name: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid_argument("Playlist name is required"));
        }

        let playlist = self.store.create_playlist(name, caller).await?;
        debug!(playlist_id = %playlist.id, owner = %caller, "Playlist created");
        Ok(playlist)
    }

    /// Append a song to one of the caller's playlists
    pub async fn add_song_to_playlist(
        &self,
        caller: &UserId,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<Playlist> {
        let _guard = self.locks.acquire(playlist_lock(playlist_id)).await;

        let playlist = self.require_owned_playlist(caller, playlist_id).await?;
        self.require_song(song_id).await?;

        if playlist.contains(song_id) {
            return Err(CoreError::conflict("Song already in playlist"));
        }

        let playlist = self.store.add_playlist_song(playlist_id, song_id).await?;
        debug!(playlist_id = %playlist_id, song_id = %song_id, "Song added to playlist");
        Ok(playlist)
    }

    /// Remove a member from one of the caller's playlists
    pub async fn remove_song_from_playlist(
        &self,
        caller: &UserId,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<Playlist> {
        let _guard = self.locks.acquire(playlist_lock(playlist_id)).await;

        let mut playlist = self.require_owned_playlist(caller, playlist_id).await?;

        if !self.store.remove_playlist_song(playlist_id, song_id).await? {
            return Err(CoreError::not_found("Song in playlist", song_id.as_str()));
        }

        playlist.songs.retain(|s| s != song_id);
        debug!(playlist_id = %playlist_id, song_id = %song_id, "Song removed from playlist");
        Ok(playlist)
    }

    /// Delete one of the caller's playlists; member songs are untouched
    pub async fn delete_playlist(&self, caller: &UserId, id: &PlaylistId) -> Result<()> {
        let _guard = self.locks.acquire(playlist_lock(id)).await;

        self.require_owned_playlist(caller, id).await?;

        if !self.store.delete_playlist(id).await? {
            return Err(CoreError::not_found("Playlist", id.as_str()));
        }

        info!(playlist_id = %id, "Playlist deleted");
        Ok(())
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Remove every library record. Stored files are left in place.
    pub async fn reset(&self) -> Result<()> {
        self.store.reset().await
    }
}
