//! Tunebox - Playback
//!
//! Client-resident playback logic for Tunebox.
//!
//! This crate provides:
//! - Library snapshot with local edits and optimistic favorites
//! - Queue resolution (view + search over the all-songs order)
//! - Playback session state machine (Stopped / Loading / Playing / Paused)
//! - Shuffle and sequential navigation
//! - Volume (0.0-1.0, mute/unmute)
//! - Session events for UI synchronization
//!
//! # Architecture
//!
//! `tunebox-playback` knows nothing about HTTP or any particular audio
//! backend. The platform media element is reached through the
//! [`MediaElement`] trait and reports back with [`MediaEvent`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! use tunebox_playback::{MediaElement, Player, SessionConfig, View};
//!
//! fn run<M: MediaElement>(media: M) {
//!     let mut player = Player::new(media, SessionConfig::default());
//!
//!     player.select_view(View::Favorites);
//!     player.set_search("cat");
//!
//!     if let Some(first) = player.queue().first() {
//!         player.select_track(&first.id).ok();
//!     }
//!
//!     for event in player.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

mod error;
mod events;
mod library;
mod media;
mod player;
mod queue;
mod session;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use library::{FavoriteToggle, LibrarySnapshot};
pub use media::{Generation, MediaElement, MediaEvent, MediaEventKind, PlayFailure};
pub use player::{format_time, Player};
pub use queue::resolve_queue;
pub use session::PlaybackSession;
pub use shuffle::pick_other_index;
pub use types::{PlaybackState, SessionConfig, View};
pub use volume::Volume;
