//! Playback Session state machine
//!
//! ```text
//! Stopped ──select──▶ Loading ──ready + play ok──▶ Playing ⇄ Paused
//!    ▲                   │                            │
//!    └──end of queue─────┴──────── natural end ───────┘ (next track → Loading)
//! ```
//!
//! Single-threaded and event driven: every transition is a method call or a
//! [`MediaEvent`] handed to [`PlaybackSession::handle_media_event`]. Events
//! carry the selection generation they belong to; anything from an older
//! selection is dropped.

use crate::error::{PlaybackError, Result};
use crate::events::SessionEvent;
use crate::media::{Generation, MediaElement, MediaEvent, MediaEventKind, PlayFailure};
use crate::shuffle::{next_index, pick_other_index, prev_index};
use crate::types::{PlaybackState, SessionConfig};
use crate::volume::Volume;
use tracing::{debug, warn};
use tunebox_core::{Song, SongId};

/// Transport, current track and modes for one running client
pub struct PlaybackSession<M: MediaElement> {
    media: M,
    config: SessionConfig,

    state: PlaybackState,
    current: Option<Song>,
    generation: Generation,
    /// Generation a play attempt was already issued for
    play_requested: Option<Generation>,

    /// Seconds, 0 ≤ position ≤ duration once duration is known
    position: f64,
    duration: Option<f64>,

    volume: Volume,
    shuffle: bool,
    repeat: bool,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl<M: MediaElement> PlaybackSession<M> {
    /// Create a stopped session and push the initial modes to the element
    pub fn new(mut media: M, config: SessionConfig) -> Self {
        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        media.set_volume(volume.level());
        media.set_muted(volume.is_muted());
        media.set_looping(config.repeat);

        Self {
            media,
            shuffle: config.shuffle,
            repeat: config.repeat,
            config,
            state: PlaybackState::Stopped,
            current: None,
            generation: 0,
            play_requested: None,
            position: 0.0,
            duration: None,
            volume,
            pending_events: Vec::new(),
        }
    }

    // ===== Track selection =====

    /// Make `song` the current track and start loading it.
    ///
    /// Supersedes any load still in flight: results for the previous
    /// selection arrive with an old generation and are ignored.
    pub fn select_track(&mut self, song: Song) {
        self.generation += 1;
        let generation = self.generation;
        let source = self.config.source_for(&song.file_path);

        debug!(song_id = %song.id, generation, source = %source, "Selecting track");

        self.media.pause();
        self.media.load(&source, generation);

        let song_id = song.id.clone();
        self.current = Some(song);
        self.position = 0.0;
        self.duration = None;
        self.emit(SessionEvent::TrackChanged {
            song_id: Some(song_id),
        });
        self.emit(SessionEvent::PositionChanged { position: 0.0 });
        self.set_state(PlaybackState::Loading);

        if self.media.is_ready() {
            self.request_play();
        }
    }

    /// Issue the play attempt for the current generation, at most once
    fn request_play(&mut self) {
        if self.play_requested == Some(self.generation) {
            return;
        }
        self.play_requested = Some(self.generation);
        self.media.play(self.generation);
    }

    /// Stop playback and forget the current track
    pub fn clear(&mut self) {
        self.generation += 1;
        self.media.pause();
        self.media.unload();

        let had_track = self.current.take().is_some();
        self.position = 0.0;
        self.duration = None;
        if had_track {
            self.emit(SessionEvent::TrackChanged { song_id: None });
        }
        self.set_state(PlaybackState::Stopped);
    }

    /// Swap in fresh metadata for the current track (after an edit)
    pub fn refresh_current(&mut self, song: &Song) {
        if let Some(current) = self.current.as_mut() {
            if current.id == song.id {
                *current = song.clone();
                self.emit(SessionEvent::TrackChanged {
                    song_id: Some(song.id.clone()),
                });
            }
        }
    }

    // ===== Playback control =====

    /// Playing ⇄ Paused; nothing to toggle while stopped or loading
    pub fn toggle_play(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                self.media.pause();
                self.set_state(PlaybackState::Paused);
            }
            PlaybackState::Paused => {
                self.media.play(self.generation);
                self.set_state(PlaybackState::Playing);
            }
            PlaybackState::Stopped | PlaybackState::Loading => {}
        }
    }

    /// Advance through `queue`.
    ///
    /// Shuffle picks any other entry; otherwise the next entry, or a stop
    /// (keeping the current track) at the end of the queue.
    pub fn play_next(&mut self, queue: &[Song]) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        if queue.is_empty() {
            return;
        }

        let index = queue.iter().position(|s| s.id == current.id);
        let target = if self.shuffle {
            pick_other_index(queue.len(), index, &mut rand::thread_rng())
        } else {
            next_index(queue.len(), index)
        };

        match target {
            Some(i) => self.select_track(queue[i].clone()),
            None => {
                debug!("End of queue reached");
                self.media.pause();
                self.set_state(PlaybackState::Stopped);
            }
        }
    }

    /// Step back through `queue`; nothing happens at the head
    pub fn play_prev(&mut self, queue: &[Song]) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        if queue.is_empty() {
            return;
        }

        let index = queue.iter().position(|s| s.id == current.id);
        let target = if self.shuffle {
            pick_other_index(queue.len(), index, &mut rand::thread_rng())
        } else {
            prev_index(index)
        };

        if let Some(i) = target {
            self.select_track(queue[i].clone());
        }
    }

    /// Jump to `seconds`, clamped to the track length.
    ///
    /// Rejected until the element has reported a duration.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        if self.current.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if seconds.is_nan() {
            return Err(PlaybackError::InvalidSeekPosition(seconds));
        }
        let duration = self.duration.ok_or(PlaybackError::DurationUnknown)?;

        let target = seconds.clamp(0.0, duration);
        self.position = target;
        self.media.seek(target);
        self.emit(SessionEvent::PositionChanged { position: target });
        Ok(())
    }

    /// Seek to a fraction (0.0-1.0) of the track, as from a progress bar
    pub fn seek_fraction(&mut self, fraction: f64) -> Result<()> {
        let duration = self.duration.ok_or(PlaybackError::DurationUnknown)?;
        self.seek(fraction.clamp(0.0, 1.0) * duration)
    }

    // ===== Volume and modes =====

    /// Set volume level (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Set volume from a click at `offset` along a bar `width` wide
    pub fn set_volume_from_position(&mut self, offset: f32, width: f32) {
        self.volume.set_from_position(offset, width);
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        self.media.set_looping(self.repeat);
        self.emit_modes();
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.emit_modes();
    }

    // ===== Media events =====

    /// Apply an event reported by the media element.
    ///
    /// `queue` is the queue as it stands now; it is consulted only when a
    /// track ends naturally.
    pub fn handle_media_event(&mut self, event: MediaEvent, queue: &[Song]) {
        if event.generation != self.generation {
            debug!(
                event_generation = event.generation,
                current_generation = self.generation,
                "Ignoring event from superseded selection"
            );
            return;
        }

        match event.kind {
            MediaEventKind::Ready => {
                if self.state == PlaybackState::Loading {
                    self.request_play();
                }
            }
            MediaEventKind::PlayResolved(Ok(())) => {
                if self.state == PlaybackState::Loading {
                    self.set_state(PlaybackState::Playing);
                }
            }
            MediaEventKind::PlayResolved(Err(failure)) => self.play_failed(failure),
            MediaEventKind::Ended => {
                if self.repeat {
                    // The element loops on its own
                    return;
                }
                self.play_next(queue);
            }
            MediaEventKind::TimeUpdate(seconds) => {
                if seconds.is_finite() {
                    let upper = self.duration.unwrap_or(f64::MAX);
                    self.position = seconds.clamp(0.0, upper);
                    self.emit(SessionEvent::PositionChanged {
                        position: self.position,
                    });
                }
            }
            MediaEventKind::DurationKnown(seconds) => {
                if seconds.is_finite() && seconds >= 0.0 {
                    self.duration = Some(seconds);
                    self.position = self.position.min(seconds);
                    self.emit(SessionEvent::DurationKnown { duration: seconds });
                }
            }
        }
    }

    fn play_failed(&mut self, failure: PlayFailure) {
        let Some(song_id) = self.current.as_ref().map(|s| s.id.clone()) else {
            return;
        };

        match failure {
            PlayFailure::Interrupted => {
                debug!(song_id = %song_id, "Play attempt interrupted");
            }
            other => {
                warn!(song_id = %song_id, reason = %other, "Playback failed to start");
                self.emit(SessionEvent::PlaybackFailed {
                    song_id,
                    reason: other.to_string(),
                });
            }
        }

        if matches!(self.state, PlaybackState::Loading | PlaybackState::Playing) {
            self.set_state(PlaybackState::Paused);
        }
    }

    // ===== State queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_track(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    pub fn current_track_id(&self) -> Option<&SongId> {
        self.current.as_ref().map(|s| &s.id)
    }

    /// Playback position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Track length in seconds, once the element has reported it
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Volume level (0.0-1.0), independent of mute
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Generation of the current selection
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    // ===== Events =====

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit(&mut self, event: SessionEvent) {
        self.pending_events.push(event);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.emit(SessionEvent::StateChanged { state });
        }
    }

    fn apply_volume(&mut self) {
        self.media.set_volume(self.volume.level());
        self.media.set_muted(self.volume.is_muted());
        self.emit(SessionEvent::VolumeChanged {
            level: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    fn emit_modes(&mut self) {
        self.emit(SessionEvent::ModesChanged {
            shuffle: self.shuffle,
            repeat: self.repeat,
        });
    }
}
