//! Binds server calls to the local player.
//!
//! Every mutation goes to the server first and is applied to the
//! [`Player`] only once confirmed. Favorite toggles are the exception: the
//! flag flips locally right away and is flipped back if the call fails.

use crate::client::TuneboxClient;
use crate::error::Result;
use crate::types::UploadMetadata;
use std::path::Path;
use tracing::{debug, warn};
use tunebox_core::{Playlist, PlaylistId, Song, SongId, UpdateSong};
use tunebox_playback::{MediaElement, Player};

/// Server client plus the player it keeps in sync
pub struct PlayerController<M: MediaElement> {
    client: TuneboxClient,
    player: Player<M>,
}

impl<M: MediaElement> PlayerController<M> {
    pub fn new(client: TuneboxClient, player: Player<M>) -> Self {
        Self { client, player }
    }

    pub fn client(&self) -> &TuneboxClient {
        &self.client
    }

    pub fn player(&self) -> &Player<M> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player<M> {
        &mut self.player
    }

    /// Reload songs, playlists and favorites from the server
    pub async fn refresh(&mut self) -> Result<()> {
        let handle = self.client.library().await?;
        let library = handle.client();

        let songs = library.list_songs().await?;
        let playlists = library.list_playlists().await?;
        let favorites = library.list_favorites().await?;

        debug!(
            songs = songs.len(),
            playlists = playlists.len(),
            favorites = favorites.len(),
            "Library refreshed"
        );

        self.player
            .replace_library(songs, playlists, favorites.into_iter().map(|s| s.id));
        Ok(())
    }

    /// Flip a song's favorite flag.
    ///
    /// Applied locally before the request; reverted if the server rejects
    /// it. Returns whether the song is now a favorite.
    pub async fn toggle_favorite(&mut self, song_id: &SongId) -> Result<bool> {
        let toggle = self.player.begin_favorite_toggle(song_id);

        let outcome = match self.client.library().await {
            Ok(handle) => {
                let library = handle.client();
                if toggle.is_add() {
                    library.add_favorite(song_id).await.map(|_| ())
                } else {
                    library.remove_favorite(song_id).await
                }
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => Ok(toggle.is_add()),
            Err(e) => {
                warn!(song_id = %song_id, error = %e, "Favorite toggle rejected, reverting");
                self.player.revert_favorite_toggle(&toggle);
                Err(e)
            }
        }
    }

    /// Delete a song; playback stops if it was the current track
    pub async fn delete_song(&mut self, song_id: &SongId) -> Result<()> {
        self.client
            .library()
            .await?
            .client()
            .delete_song(song_id)
            .await?;

        self.player.song_deleted(song_id);
        Ok(())
    }

    pub async fn update_song(&mut self, song_id: &SongId, update: &UpdateSong) -> Result<Song> {
        let song = self
            .client
            .library()
            .await?
            .client()
            .update_song(song_id, update)
            .await?;

        self.player.song_updated(song.clone());
        Ok(song)
    }

    /// Upload a file with title from its stem and the unknown-artist default
    pub async fn upload(&mut self, path: &Path) -> Result<Song> {
        let metadata = UploadMetadata::for_file(path);
        let song = self
            .client
            .upload()
            .await?
            .client()
            .upload_file(path, &metadata)
            .await?;

        self.player.song_added(song.clone());
        Ok(song)
    }

    pub async fn create_playlist(&mut self, name: &str) -> Result<Playlist> {
        let playlist = self
            .client
            .library()
            .await?
            .client()
            .create_playlist(name)
            .await?;

        self.player.playlist_saved(playlist.clone());
        Ok(playlist)
    }

    /// Add a song to a playlist (drop target)
    pub async fn add_to_playlist(
        &mut self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<Playlist> {
        let playlist = self
            .client
            .library()
            .await?
            .client()
            .add_to_playlist(playlist_id, song_id)
            .await?;

        self.player.playlist_saved(playlist.clone());
        Ok(playlist)
    }

    pub async fn remove_from_playlist(
        &mut self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<Playlist> {
        let playlist = self
            .client
            .library()
            .await?
            .client()
            .remove_from_playlist(playlist_id, song_id)
            .await?;

        self.player.playlist_saved(playlist.clone());
        Ok(playlist)
    }

    /// Delete a playlist; a view showing it falls back to all songs
    pub async fn delete_playlist(&mut self, playlist_id: &PlaylistId) -> Result<()> {
        self.client
            .library()
            .await?
            .client()
            .delete_playlist(playlist_id)
            .await?;

        self.player.playlist_deleted(playlist_id);
        Ok(())
    }
}
