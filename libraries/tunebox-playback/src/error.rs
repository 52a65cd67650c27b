//! Error types for the playback session

use thiserror::Error;

/// Playback errors
///
/// These never leave the client: a failed play attempt is a state
/// (`Paused`), not an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The media element has not reported a duration yet
    #[error("Duration not known yet")]
    DurationUnknown,

    /// Seek target is not a number
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Song id is not part of the local library
    #[error("Unknown song: {0}")]
    UnknownSong(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
