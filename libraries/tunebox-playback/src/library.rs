//! Client-side copy of the library

use crate::queue::resolve_queue;
use crate::types::View;
use std::collections::HashSet;
use tunebox_core::{Playlist, PlaylistId, Song, SongId};

/// Songs, the user's playlists and favorite ids as last fetched, plus
/// local edits applied since.
#[derive(Debug, Clone, Default)]
pub struct LibrarySnapshot {
    songs: Vec<Song>,
    playlists: Vec<Playlist>,
    favorites: HashSet<SongId>,
}

/// Local favorite flip that can be undone if the server rejects it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub song_id: SongId,
    /// State before the flip
    pub was_favorite: bool,
}

impl FavoriteToggle {
    /// Whether the flip added the favorite
    pub fn is_add(&self) -> bool {
        !self.was_favorite
    }
}

impl LibrarySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// All songs in server order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn favorites(&self) -> &HashSet<SongId> {
        &self.favorites
    }

    pub fn song(&self, id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|s| &s.id == id)
    }

    pub fn playlist(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    pub fn is_favorite(&self, id: &SongId) -> bool {
        self.favorites.contains(id)
    }

    /// Queue for `view` and `search` over this snapshot
    pub fn queue(&self, view: &View, search: &str) -> Vec<Song> {
        resolve_queue(&self.songs, &self.playlists, &self.favorites, view, search)
    }

    // ===== Refresh from server =====

    pub fn replace_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
    }

    /// Replace playlists; duplicate member ids are collapsed
    pub fn replace_playlists(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists.into_iter().map(dedup_members).collect();
    }

    pub fn replace_favorites(&mut self, ids: impl IntoIterator<Item = SongId>) {
        self.favorites = ids.into_iter().collect();
    }

    // ===== Local edits =====

    /// Replace an edited song in place, or append a new one
    pub fn upsert_song(&mut self, song: Song) {
        match self.songs.iter_mut().find(|s| s.id == song.id) {
            Some(existing) => *existing = song,
            None => self.songs.push(song),
        }
    }

    /// Forget a deleted song everywhere it is referenced
    pub fn remove_song(&mut self, id: &SongId) -> Option<Song> {
        let index = self.songs.iter().position(|s| &s.id == id)?;
        for playlist in &mut self.playlists {
            playlist.songs.retain(|s| s != id);
        }
        self.favorites.remove(id);
        Some(self.songs.remove(index))
    }

    /// Replace a playlist with the server's copy, or append it
    pub fn upsert_playlist(&mut self, playlist: Playlist) {
        let playlist = dedup_members(playlist);
        match self.playlists.iter_mut().find(|p| p.id == playlist.id) {
            Some(existing) => *existing = playlist,
            None => self.playlists.push(playlist),
        }
    }

    pub fn remove_playlist(&mut self, id: &PlaylistId) -> Option<Playlist> {
        let index = self.playlists.iter().position(|p| &p.id == id)?;
        Some(self.playlists.remove(index))
    }

    /// Flip the favorite flag locally before the server confirms it
    pub fn toggle_favorite(&mut self, id: &SongId) -> FavoriteToggle {
        let was_favorite = self.favorites.remove(id);
        if !was_favorite {
            self.favorites.insert(id.clone());
        }
        FavoriteToggle {
            song_id: id.clone(),
            was_favorite,
        }
    }

    /// Undo a toggle the server rejected
    pub fn revert_favorite(&mut self, toggle: &FavoriteToggle) {
        if toggle.was_favorite {
            self.favorites.insert(toggle.song_id.clone());
        } else {
            self.favorites.remove(&toggle.song_id);
        }
    }
}

fn dedup_members(mut playlist: Playlist) -> Playlist {
    let mut seen = HashSet::new();
    playlist.songs.retain(|id| seen.insert(id.clone()));
    playlist
}
