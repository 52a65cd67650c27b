/// Playlist domain types
use crate::types::{PlaylistId, Song, SongId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playlist with its membership list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Owner user ID
    pub owner_id: UserId,

    /// Member song ids in insertion order, each at most once
    pub songs: Vec<SongId>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Whether `user` may mutate or delete this playlist
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Whether `song` is in the membership list
    pub fn contains(&self, song: &SongId) -> bool {
        self.songs.iter().any(|s| s == song)
    }
}

/// Playlist whose membership has been expanded into song records.
///
/// Members that no longer resolve to a song are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistWithSongs {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub tracks: Vec<Song>,
}
