//! Session Events
//!
//! Event-based communication for UI synchronization. The session queues
//! events as its state changes; the UI drains them after each call.

use crate::types::PlaybackState;
use serde::Serialize;
use tunebox_core::SongId;

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEvent {
    /// Transport state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Current track changed (`None` after the track was cleared)
    TrackChanged {
        /// ID of the new current track
        song_id: Option<SongId>,
    },

    /// Playback position moved (seconds)
    PositionChanged {
        /// Current position
        position: f64,
    },

    /// The element reported the track duration (seconds)
    DurationKnown {
        /// Total track duration
        duration: f64,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        muted: bool,
    },

    /// Shuffle or repeat toggled
    ModesChanged {
        /// Shuffle flag
        shuffle: bool,
        /// Repeat flag
        repeat: bool,
    },

    /// A play attempt failed for a reason other than being superseded
    PlaybackFailed {
        /// Track that did not start
        song_id: SongId,
        /// Failure description from the element
        reason: String,
    },
}
