//! Song, playlist and favorite operations.

use crate::error::{expect_success, map_send_error, read_json, Result};
use crate::types::{CreatePlaylistRequest, MessageResponse, SongRef, SongResponse};
use reqwest::{Client, RequestBuilder};
use tracing::debug;
use tunebox_core::{Favorite, Playlist, PlaylistId, PlaylistWithSongs, Song, SongId, UpdateSong};

/// Library client for a Tunebox server.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        request
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(map_send_error)
    }

    // ===== Songs =====

    /// Every song on the server, oldest first.
    pub async fn list_songs(&self) -> Result<Vec<Song>> {
        let url = self.url("/songs");
        debug!(url = %url, "Fetching songs");

        let response = self.send(self.http.get(&url)).await?;
        let songs: Vec<Song> = read_json(response, "song list").await?;

        debug!(songs = songs.len(), "Fetched songs");
        Ok(songs)
    }

    /// Change title and/or artist of one of the caller's songs.
    pub async fn update_song(&self, id: &SongId, update: &UpdateSong) -> Result<Song> {
        let url = self.url(&format!("/songs/{}", id));
        debug!(url = %url, song_id = %id, "Updating song");

        let response = self.send(self.http.put(&url).json(update)).await?;
        let body: SongResponse = read_json(response, "song update").await?;
        Ok(body.song)
    }

    /// Delete one of the caller's songs along with its references.
    pub async fn delete_song(&self, id: &SongId) -> Result<()> {
        let url = self.url(&format!("/songs/{}", id));
        debug!(url = %url, song_id = %id, "Deleting song");

        let response = self.send(self.http.delete(&url)).await?;
        let body: MessageResponse = read_json(response, "song deletion").await?;

        debug!(song_id = %id, message = %body.message, "Song deleted");
        Ok(())
    }

    // ===== Playlists =====

    /// The caller's playlists with their membership lists.
    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let url = self.url("/playlists");
        let response = self.send(self.http.get(&url)).await?;
        read_json(response, "playlist list").await
    }

    /// One playlist with its member songs expanded.
    pub async fn get_playlist(&self, id: &PlaylistId) -> Result<PlaylistWithSongs> {
        let url = self.url(&format!("/playlists/{}", id));
        let response = self.send(self.http.get(&url)).await?;
        read_json(response, "playlist").await
    }

    pub async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let url = self.url("/playlists");
        debug!(url = %url, name = %name, "Creating playlist");

        let response = self
            .send(self.http.post(&url).json(&CreatePlaylistRequest { name }))
            .await?;
        read_json(response, "created playlist").await
    }

    pub async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        let url = self.url(&format!("/playlists/{}", id));
        debug!(url = %url, playlist_id = %id, "Deleting playlist");

        let response = self.send(self.http.delete(&url)).await?;
        expect_success(response).await
    }

    /// Add a song; returns the playlist as the server now has it.
    pub async fn add_to_playlist(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<Playlist> {
        let url = self.url(&format!("/playlists/{}/songs", playlist_id));
        debug!(url = %url, song_id = %song_id, "Adding song to playlist");

        let response = self
            .send(self.http.post(&url).json(&SongRef { song_id }))
            .await?;
        read_json(response, "playlist").await
    }

    /// Remove a song; returns the playlist as the server now has it.
    pub async fn remove_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<Playlist> {
        let url = self.url(&format!("/playlists/{}/songs/{}", playlist_id, song_id));
        debug!(url = %url, "Removing song from playlist");

        let response = self.send(self.http.delete(&url)).await?;
        read_json(response, "playlist").await
    }

    // ===== Favorites =====

    /// Songs the caller has marked as favorite.
    pub async fn list_favorites(&self) -> Result<Vec<Song>> {
        let url = self.url("/favorites");
        let response = self.send(self.http.get(&url)).await?;
        read_json(response, "favorite list").await
    }

    pub async fn add_favorite(&self, song_id: &SongId) -> Result<Favorite> {
        let url = self.url("/favorites");
        debug!(url = %url, song_id = %song_id, "Adding favorite");

        let response = self
            .send(self.http.post(&url).json(&SongRef { song_id }))
            .await?;
        read_json(response, "favorite").await
    }

    pub async fn remove_favorite(&self, song_id: &SongId) -> Result<()> {
        let url = format!(
            "{}?songId={}",
            self.url("/favorites"),
            urlencoding::encode(song_id.as_str())
        );
        debug!(url = %url, song_id = %song_id, "Removing favorite");

        let response = self.send(self.http.delete(&url)).await?;
        expect_success(response).await
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
