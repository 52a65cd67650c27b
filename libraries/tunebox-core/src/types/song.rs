/// Song domain types
use crate::types::{SongId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Artist recorded when an upload does not name one
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// An uploaded audio file and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Duration in seconds, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Reference to the stored audio bytes (path relative to the static root)
    pub file_path: String,

    /// Reference to album art, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,

    /// Owning user
    pub owner_id: UserId,

    /// When the song was uploaded
    pub created_at: DateTime<Utc>,
}

impl Song {
    /// Whether `user` may mutate or delete this song
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Case-insensitive substring match against title or artist.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.artist.to_lowercase().contains(needle)
    }
}

/// Data required to create a song record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSong {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: Option<f64>,
    pub file_path: String,
    pub album_art: Option<String>,
    pub owner_id: UserId,
}

impl CreateSong {
    /// Create with the required fields only
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        file_path: impl Into<String>,
        owner_id: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: None,
            duration: None,
            file_path: file_path.into(),
            album_art: None,
            owner_id,
        }
    }
}

/// Partial song update.
///
/// `None` leaves a field unchanged; `Some("")` is a real update to the empty
/// string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSong {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}

impl UpdateSong {
    /// True when neither field is supplied
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none()
    }

    /// Copy with every supplied field trimmed
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.as_deref().map(|t| t.trim().to_string()),
            artist: self.artist.as_deref().map(|a| a.trim().to_string()),
        }
    }
}
