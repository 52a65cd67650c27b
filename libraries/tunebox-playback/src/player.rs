//! UI-owned player context
//!
//! Bundles the library snapshot, the selected view, the search term and the
//! playback session. There is one per running client, created at start-up
//! and owned by the UI layer.

use crate::error::{PlaybackError, Result};
use crate::events::SessionEvent;
use crate::library::{FavoriteToggle, LibrarySnapshot};
use crate::media::{MediaElement, MediaEvent};
use crate::session::PlaybackSession;
use crate::types::{SessionConfig, View};
use tunebox_core::{Playlist, PlaylistId, Song, SongId};

/// Library view plus playback for one client
pub struct Player<M: MediaElement> {
    library: LibrarySnapshot,
    view: View,
    search: String,
    session: PlaybackSession<M>,
}

impl<M: MediaElement> Player<M> {
    pub fn new(media: M, config: SessionConfig) -> Self {
        Self {
            library: LibrarySnapshot::new(),
            view: View::All,
            search: String::new(),
            session: PlaybackSession::new(media, config),
        }
    }

    pub fn library(&self) -> &LibrarySnapshot {
        &self.library
    }

    pub fn session(&self) -> &PlaybackSession<M> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlaybackSession<M> {
        &mut self.session
    }

    // ===== View and search =====

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// The queue as it stands right now
    pub fn queue(&self) -> Vec<Song> {
        self.library.queue(&self.view, &self.search)
    }

    // ===== Transport =====

    /// Start playing a song from the library
    pub fn select_track(&mut self, id: &SongId) -> Result<()> {
        let song = self
            .library
            .song(id)
            .cloned()
            .ok_or_else(|| PlaybackError::UnknownSong(id.to_string()))?;
        self.session.select_track(song);
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.session.toggle_play();
    }

    pub fn play_next(&mut self) {
        let queue = self.queue();
        self.session.play_next(&queue);
    }

    pub fn play_prev(&mut self) {
        let queue = self.queue();
        self.session.play_prev(&queue);
    }

    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        self.session.seek(seconds)
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        let queue = self.queue();
        self.session.handle_media_event(event, &queue);
    }

    /// Take every session event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.session.drain_events()
    }

    // ===== Library changes confirmed by the server =====

    /// Swap in a fresh listing from the server.
    ///
    /// A current track the listing no longer contains is stopped and
    /// cleared, the same as a local delete; one that is still there picks up
    /// any edits. A viewed playlist that disappeared resets the view.
    pub fn replace_library(
        &mut self,
        songs: Vec<Song>,
        playlists: Vec<Playlist>,
        favorites: impl IntoIterator<Item = SongId>,
    ) {
        if let Some(current) = self.session.current_track().cloned() {
            match songs.iter().find(|s| s.id == current.id) {
                Some(song) if *song != current => self.session.refresh_current(song),
                Some(_) => {}
                None => self.session.clear(),
            }
        }

        self.library.replace_songs(songs);
        self.library.replace_playlists(playlists);
        self.library.replace_favorites(favorites);

        if let View::Playlist(id) = &self.view {
            if self.library.playlist(id).is_none() {
                self.view = View::All;
            }
        }
    }

    /// Add a freshly uploaded song
    pub fn song_added(&mut self, song: Song) {
        self.library.upsert_song(song);
    }

    /// Apply an edited song; the displayed track follows the edit
    pub fn song_updated(&mut self, song: Song) {
        self.session.refresh_current(&song);
        self.library.upsert_song(song);
    }

    /// Forget a deleted song, stopping playback first if it is current
    pub fn song_deleted(&mut self, id: &SongId) {
        if self.session.current_track_id() == Some(id) {
            self.session.clear();
        }
        self.library.remove_song(id);
    }

    pub fn playlist_saved(&mut self, playlist: Playlist) {
        self.library.upsert_playlist(playlist);
    }

    /// Forget a deleted playlist; a view showing it falls back to all songs
    pub fn playlist_deleted(&mut self, id: &PlaylistId) {
        self.library.remove_playlist(id);
        if self.view == View::Playlist(id.clone()) {
            self.view = View::All;
        }
    }

    // ===== Optimistic favorites =====

    /// Flip the favorite flag ahead of the network call
    pub fn begin_favorite_toggle(&mut self, id: &SongId) -> FavoriteToggle {
        self.library.toggle_favorite(id)
    }

    /// Undo a flip the server rejected
    pub fn revert_favorite_toggle(&mut self, toggle: &FavoriteToggle) {
        self.library.revert_favorite(toggle);
    }
}

/// Render seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
