//! Core types for playback

use serde::{Deserialize, Serialize};
use tunebox_core::PlaylistId;

/// Transport state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track playing; a finished queue keeps its last track for display
    Stopped,

    /// Source assigned, waiting for the element to become ready
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Which slice of the library feeds the queue
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum View {
    /// Every song
    #[default]
    All,

    /// The user's favorite songs
    Favorites,

    /// Members of one playlist
    Playlist(PlaylistId),
}

/// Configuration for a new playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Initial mute state (default: false)
    pub muted: bool,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat flag (default: false)
    pub repeat: bool,

    /// Prefix joined with a song's file reference to form the media source
    pub media_base_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            muted: false,
            shuffle: false,
            repeat: false,
            media_base_url: "http://localhost:3003".to_string(),
        }
    }
}

impl SessionConfig {
    /// Media source for a stored file reference
    pub fn source_for(&self, file_path: &str) -> String {
        if file_path.starts_with("http://") || file_path.starts_with("https://") {
            return file_path.to_string();
        }
        format!(
            "{}/{}",
            self.media_base_url.trim_end_matches('/'),
            file_path.trim_start_matches('/')
        )
    }
}
