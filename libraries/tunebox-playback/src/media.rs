//! Media element abstraction
//!
//! The session drives a platform media element (an HTML audio element, a
//! native decoder) through [`MediaElement`]. Everything the element does
//! asynchronously comes back as a [`MediaEvent`] tagged with the selection
//! generation it belongs to, so results for a superseded track can be told
//! apart and dropped.

use std::fmt;

/// Monotonic counter bumped on every track selection
pub type Generation = u64;

/// Why a play attempt did not start playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayFailure {
    /// A newer load or pause cut the attempt short
    Interrupted,

    /// The platform refused to start playback (autoplay policy)
    NotAllowed,

    /// Decoding or network failure
    Other(String),
}

impl fmt::Display for PlayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupted => write!(f, "interrupted"),
            Self::NotAllowed => write!(f, "not allowed"),
            Self::Other(reason) => write!(f, "{}", reason),
        }
    }
}

/// What happened on the element
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Enough data buffered to start playback
    Ready,

    /// Outcome of a `play` call
    PlayResolved(Result<(), PlayFailure>),

    /// Playback reached the end of the source
    Ended,

    /// Playback position advanced (seconds)
    TimeUpdate(f64),

    /// Source metadata loaded; total length in seconds
    DurationKnown(f64),
}

/// Event reported by a media element
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    /// Generation passed to the `load`/`play` call this belongs to
    pub generation: Generation,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(generation: Generation, kind: MediaEventKind) -> Self {
        Self { generation, kind }
    }
}

/// Platform media playback primitive
///
/// Implementations perform each call immediately and report asynchronous
/// outcomes (`Ready`, `PlayResolved`, `Ended`, ...) back to the session as
/// [`MediaEvent`]s carrying the generation they were started with.
pub trait MediaElement {
    /// Replace the source and start loading it
    fn load(&mut self, source: &str, generation: Generation);

    /// Drop the source entirely
    fn unload(&mut self);

    /// Whether the current source already has enough data to play
    fn is_ready(&self) -> bool;

    /// Attempt to start playback; the outcome arrives as `PlayResolved`
    fn play(&mut self, generation: Generation);

    /// Pause playback
    fn pause(&mut self);

    /// Jump to `seconds`
    fn seek(&mut self, seconds: f64);

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Total length in seconds, once known
    fn duration(&self) -> Option<f64>;

    /// Output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Mute without changing the volume
    fn set_muted(&mut self, muted: bool);

    /// Loop the current source instead of ending
    fn set_looping(&mut self, looping: bool);
}
