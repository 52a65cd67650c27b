//! Playback session and player tests against a scripted media element

use chrono::Utc;
use tunebox_core::{Playlist, PlaylistId, Song, SongId, UserId};
use tunebox_playback::{
    Generation, MediaElement, MediaEvent, MediaEventKind, PlayFailure, PlaybackError,
    PlaybackSession, PlaybackState, Player, SessionConfig, SessionEvent, View,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(String, Generation),
    Unload,
    Play(Generation),
    Pause,
    Seek(f64),
    Volume(f32),
    Muted(bool),
    Looping(bool),
}

/// Media element that records calls and reports readiness on demand
#[derive(Default)]
struct ScriptedMedia {
    calls: Vec<Call>,
    ready: bool,
    position: f64,
    duration: Option<f64>,
}

impl ScriptedMedia {
    fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    fn plays(&self) -> Vec<Generation> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Play(g) => Some(*g),
                _ => None,
            })
            .collect()
    }
}

impl MediaElement for ScriptedMedia {
    fn load(&mut self, source: &str, generation: Generation) {
        self.calls.push(Call::Load(source.to_string(), generation));
    }

    fn unload(&mut self) {
        self.calls.push(Call::Unload);
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn play(&mut self, generation: Generation) {
        self.calls.push(Call::Play(generation));
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
        self.calls.push(Call::Seek(seconds));
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::Volume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.push(Call::Muted(muted));
    }

    fn set_looping(&mut self, looping: bool) {
        self.calls.push(Call::Looping(looping));
    }
}

fn song(title: &str) -> Song {
    Song {
        id: SongId::generate(),
        title: title.to_string(),
        artist: "Artist".to_string(),
        album: None,
        duration: None,
        file_path: format!("uploads/{}.mp3", title),
        album_art: None,
        owner_id: UserId::new("u1"),
        created_at: Utc::now(),
    }
}

fn queue(titles: &[&str]) -> Vec<Song> {
    titles.iter().map(|t| song(t)).collect()
}

fn session(media: ScriptedMedia) -> PlaybackSession<ScriptedMedia> {
    PlaybackSession::new(media, SessionConfig::default())
}

fn ok(generation: Generation) -> MediaEvent {
    MediaEvent::new(generation, MediaEventKind::PlayResolved(Ok(())))
}

/// Select `song` and let the element confirm playback
fn start(session: &mut PlaybackSession<ScriptedMedia>, song: &Song) {
    session.select_track(song.clone());
    let generation = session.generation();
    session.handle_media_event(ok(generation), &[]);
    assert_eq!(session.state(), PlaybackState::Playing);
}

#[test]
fn new_session_pushes_initial_modes() {
    let session = session(ScriptedMedia::default());

    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.volume(), 0.7);
    assert!(session.current_track().is_none());
    assert_eq!(
        session.media().calls,
        vec![Call::Volume(0.7), Call::Muted(false), Call::Looping(false)]
    );
}

#[test]
fn select_ready_track_plays_immediately() {
    let mut session = session(ScriptedMedia::ready());
    let track = song("a");

    session.select_track(track.clone());

    assert_eq!(session.state(), PlaybackState::Loading);
    assert!(session
        .media()
        .calls
        .contains(&Call::Load("http://localhost:3003/uploads/a.mp3".to_string(), 1)));
    assert_eq!(session.media().plays(), vec![1]);

    session.handle_media_event(ok(1), &[]);
    assert_eq!(session.state(), PlaybackState::Playing);
    assert_eq!(session.current_track_id(), Some(&track.id));
}

#[test]
fn select_waits_for_readiness() {
    let mut session = session(ScriptedMedia::default());
    session.select_track(song("a"));

    assert!(session.media().plays().is_empty());

    session.handle_media_event(MediaEvent::new(1, MediaEventKind::Ready), &[]);
    assert_eq!(session.media().plays(), vec![1]);

    session.handle_media_event(ok(1), &[]);
    assert_eq!(session.state(), PlaybackState::Playing);
}

#[test]
fn ready_after_immediate_play_does_not_play_twice() {
    let mut session = session(ScriptedMedia::ready());
    session.select_track(song("a"));
    assert_eq!(session.media().plays(), vec![1]);

    // Element reports readiness while the first attempt is still pending
    session.handle_media_event(MediaEvent::new(1, MediaEventKind::Ready), &[]);
    assert_eq!(session.media().plays(), vec![1]);
    assert_eq!(session.state(), PlaybackState::Loading);

    session.handle_media_event(ok(1), &[]);
    assert_eq!(session.state(), PlaybackState::Playing);

    // A new selection gets its own attempt
    session.select_track(song("b"));
    session.handle_media_event(MediaEvent::new(2, MediaEventKind::Ready), &[]);
    assert_eq!(session.media().plays(), vec![1, 2]);
}

#[test]
fn superseded_selection_is_ignored() {
    let mut session = session(ScriptedMedia::default());
    let first = song("first");
    let second = song("second");

    session.select_track(first);
    session.select_track(second.clone());
    session.drain_events();

    // Late results for the first selection
    session.handle_media_event(MediaEvent::new(1, MediaEventKind::Ready), &[]);
    session.handle_media_event(
        MediaEvent::new(1, MediaEventKind::PlayResolved(Err(PlayFailure::Interrupted))),
        &[],
    );
    session.handle_media_event(MediaEvent::new(1, MediaEventKind::DurationKnown(99.0)), &[]);

    assert_eq!(session.state(), PlaybackState::Loading);
    assert_eq!(session.duration(), None);
    assert!(session.media().plays().is_empty());
    assert!(!session.has_pending_events());

    session.handle_media_event(MediaEvent::new(2, MediaEventKind::Ready), &[]);
    session.handle_media_event(ok(2), &[]);
    assert_eq!(session.state(), PlaybackState::Playing);
    assert_eq!(session.current_track_id(), Some(&second.id));
}

#[test]
fn interrupted_play_is_silent() {
    let mut session = session(ScriptedMedia::ready());
    session.select_track(song("a"));
    session.drain_events();

    session.handle_media_event(
        MediaEvent::new(1, MediaEventKind::PlayResolved(Err(PlayFailure::Interrupted))),
        &[],
    );

    let events = session.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, SessionEvent::PlaybackFailed { .. })));
    assert_eq!(session.state(), PlaybackState::Paused);
}

#[test]
fn failed_play_pauses_and_reports() {
    let mut session = session(ScriptedMedia::ready());
    let track = song("a");
    session.select_track(track.clone());
    session.drain_events();

    session.handle_media_event(
        MediaEvent::new(
            1,
            MediaEventKind::PlayResolved(Err(PlayFailure::Other("decode error".to_string()))),
        ),
        &[],
    );

    assert_eq!(session.state(), PlaybackState::Paused);
    assert_eq!(session.current_track_id(), Some(&track.id));
    let events = session.drain_events();
    assert!(events.contains(&SessionEvent::PlaybackFailed {
        song_id: track.id,
        reason: "decode error".to_string(),
    }));
    assert!(events.contains(&SessionEvent::StateChanged {
        state: PlaybackState::Paused
    }));
}

#[test]
fn toggle_play_only_between_playing_and_paused() {
    let mut session = session(ScriptedMedia::default());

    session.toggle_play();
    assert_eq!(session.state(), PlaybackState::Stopped);

    session.select_track(song("a"));
    session.toggle_play();
    assert_eq!(session.state(), PlaybackState::Loading);

    session.handle_media_event(MediaEvent::new(1, MediaEventKind::Ready), &[]);
    session.handle_media_event(ok(1), &[]);

    session.toggle_play();
    assert_eq!(session.state(), PlaybackState::Paused);
    session.toggle_play();
    assert_eq!(session.state(), PlaybackState::Playing);
}

#[test]
fn next_walks_queue_and_stops_at_end() {
    let mut session = session(ScriptedMedia::ready());
    let q = queue(&["a", "b", "c"]);
    start(&mut session, &q[1]);

    session.play_next(&q);
    assert_eq!(session.current_track_id(), Some(&q[2].id));
    session.handle_media_event(ok(session.generation()), &q);

    let generation = session.generation();
    session.play_next(&q);

    // No wrap: stopped, last track kept for display
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.current_track_id(), Some(&q[2].id));
    assert_eq!(session.generation(), generation);
}

#[test]
fn prev_walks_back_and_stays_at_head() {
    let mut session = session(ScriptedMedia::ready());
    let q = queue(&["a", "b", "c"]);
    start(&mut session, &q[1]);

    session.play_prev(&q);
    assert_eq!(session.current_track_id(), Some(&q[0].id));

    let generation = session.generation();
    session.play_prev(&q);
    assert_eq!(session.current_track_id(), Some(&q[0].id));
    assert_eq!(session.generation(), generation);
}

#[test]
fn navigation_without_current_or_queue_is_noop() {
    let mut session = session(ScriptedMedia::ready());
    let q = queue(&["a", "b"]);

    session.play_next(&q);
    session.play_prev(&q);
    assert!(session.current_track().is_none());

    start(&mut session, &q[0]);
    let generation = session.generation();
    session.play_next(&[]);
    session.play_prev(&[]);
    assert_eq!(session.generation(), generation);
    assert_eq!(session.state(), PlaybackState::Playing);
}

#[test]
fn current_missing_from_queue() {
    let mut session = session(ScriptedMedia::ready());
    let outsider = song("outsider");
    let q = queue(&["a", "b"]);
    start(&mut session, &outsider);

    session.play_prev(&q);
    assert_eq!(session.current_track_id(), Some(&outsider.id));

    session.play_next(&q);
    assert_eq!(session.current_track_id(), Some(&q[0].id));
}

#[test]
fn shuffle_never_reselects_current() {
    let mut session = session(ScriptedMedia::ready());
    let q = queue(&["a", "b", "c", "d"]);
    session.toggle_shuffle();
    assert!(session.shuffle());

    start(&mut session, &q[0]);
    for _ in 0..200 {
        let before = session.current_track_id().cloned();
        session.play_next(&q);
        assert_ne!(session.current_track_id().cloned(), before);

        let before = session.current_track_id().cloned();
        session.play_prev(&q);
        assert_ne!(session.current_track_id().cloned(), before);
    }
}

#[test]
fn natural_end_advances_unless_repeating() {
    let mut session = session(ScriptedMedia::ready());
    let q = queue(&["a", "b"]);
    start(&mut session, &q[0]);

    session.toggle_repeat();
    assert!(session.media().calls.contains(&Call::Looping(true)));
    session.handle_media_event(MediaEvent::new(session.generation(), MediaEventKind::Ended), &q);
    assert_eq!(session.current_track_id(), Some(&q[0].id));
    assert_eq!(session.state(), PlaybackState::Playing);

    session.toggle_repeat();
    session.handle_media_event(MediaEvent::new(session.generation(), MediaEventKind::Ended), &q);
    assert_eq!(session.current_track_id(), Some(&q[1].id));
    assert_eq!(session.state(), PlaybackState::Loading);
}

#[test]
fn seek_requires_known_duration_and_clamps() {
    let mut session = session(ScriptedMedia::ready());
    assert_eq!(session.seek(10.0), Err(PlaybackError::NoTrackLoaded));

    start(&mut session, &song("a"));
    assert_eq!(session.seek(10.0), Err(PlaybackError::DurationUnknown));
    assert_eq!(session.position(), 0.0);

    let generation = session.generation();
    session.handle_media_event(MediaEvent::new(generation, MediaEventKind::DurationKnown(200.0)), &[]);

    session.seek(500.0).unwrap();
    assert_eq!(session.position(), 200.0);
    session.seek(-5.0).unwrap();
    assert_eq!(session.position(), 0.0);
    session.seek_fraction(0.25).unwrap();
    assert_eq!(session.position(), 50.0);
    assert_eq!(session.media().current_time(), 50.0);

    assert!(matches!(
        session.seek(f64::NAN),
        Err(PlaybackError::InvalidSeekPosition(_))
    ));
}

#[test]
fn time_updates_track_position() {
    let mut session = session(ScriptedMedia::ready());
    start(&mut session, &song("a"));
    let generation = session.generation();
    session.drain_events();

    session.handle_media_event(MediaEvent::new(generation, MediaEventKind::DurationKnown(120.0)), &[]);
    session.handle_media_event(MediaEvent::new(generation, MediaEventKind::TimeUpdate(42.5)), &[]);

    assert_eq!(session.position(), 42.5);
    assert_eq!(
        session.drain_events(),
        vec![
            SessionEvent::DurationKnown { duration: 120.0 },
            SessionEvent::PositionChanged { position: 42.5 },
        ]
    );
}

#[test]
fn volume_and_mute_reach_the_element() {
    let mut session = session(ScriptedMedia::default());

    session.set_volume(1.7);
    assert_eq!(session.volume(), 1.0);

    session.set_volume_from_position(30.0, 120.0);
    assert_eq!(session.volume(), 0.25);

    session.toggle_mute();
    assert!(session.is_muted());
    assert_eq!(session.volume(), 0.25);

    let calls = &session.media().calls;
    assert!(calls.contains(&Call::Volume(1.0)));
    assert!(calls.contains(&Call::Volume(0.25)));
    assert_eq!(calls.last(), Some(&Call::Muted(true)));
}

// ===== Player =====

fn player_with(songs: Vec<Song>) -> Player<ScriptedMedia> {
    let mut player = Player::new(ScriptedMedia::ready(), SessionConfig::default());
    player.replace_library(songs, Vec::new(), Vec::<SongId>::new());
    player
}

#[test]
fn deleting_current_song_stops_and_clears() {
    let q = queue(&["a", "b"]);
    let mut player = player_with(q.clone());
    player.select_track(&q[0].id).unwrap();
    let generation = player.session().generation();
    player.handle_media_event(ok(generation));
    player.drain_events();

    player.song_deleted(&q[0].id);

    assert_eq!(player.session().state(), PlaybackState::Stopped);
    assert!(player.session().current_track().is_none());
    assert!(player.session().media().calls.contains(&Call::Unload));
    assert_eq!(player.queue().len(), 1);

    let events = player.drain_events();
    assert!(events.contains(&SessionEvent::TrackChanged { song_id: None }));

    // Late events for the cleared track change nothing
    player.handle_media_event(ok(generation));
    assert_eq!(player.session().state(), PlaybackState::Stopped);
}

#[test]
fn replacing_library_without_current_song_clears_it() {
    let q = queue(&["a", "b"]);
    let mut player = player_with(q.clone());
    player.select_track(&q[0].id).unwrap();
    player.handle_media_event(ok(player.session().generation()));
    assert_eq!(player.session().state(), PlaybackState::Playing);

    player.replace_library(vec![q[1].clone()], Vec::new(), Vec::<SongId>::new());

    assert_eq!(player.session().state(), PlaybackState::Stopped);
    assert!(player.session().current_track().is_none());
    assert!(player.session().media().calls.contains(&Call::Unload));
}

#[test]
fn deleting_other_song_keeps_playing() {
    let q = queue(&["a", "b", "c"]);
    let mut player = player_with(q.clone());
    player.select_track(&q[0].id).unwrap();
    player.handle_media_event(ok(player.session().generation()));

    player.song_deleted(&q[1].id);
    assert_eq!(player.session().state(), PlaybackState::Playing);

    // Next resolves against the queue as it is now
    player.play_next();
    assert_eq!(player.session().current_track_id(), Some(&q[2].id));
}

#[test]
fn next_follows_view_and_search() {
    let q = queue(&["cat one", "dog", "cat two"]);
    let mut player = player_with(q.clone());
    player.set_search("CAT");

    player.select_track(&q[0].id).unwrap();
    player.play_next();

    assert_eq!(player.session().current_track_id(), Some(&q[2].id));
}

#[test]
fn select_unknown_song_fails() {
    let mut player = player_with(queue(&["a"]));
    let missing = SongId::generate();

    assert_eq!(
        player.select_track(&missing),
        Err(PlaybackError::UnknownSong(missing.to_string()))
    );
    assert_eq!(player.session().state(), PlaybackState::Stopped);
}

#[test]
fn deleting_viewed_playlist_resets_view() {
    let q = queue(&["a"]);
    let mut player = player_with(q.clone());
    let playlist = Playlist {
        id: PlaylistId::generate(),
        name: "Mix".to_string(),
        owner_id: UserId::new("u1"),
        songs: vec![q[0].id.clone()],
        created_at: Utc::now(),
    };
    player.playlist_saved(playlist.clone());
    player.select_view(View::Playlist(playlist.id.clone()));
    assert_eq!(player.queue().len(), 1);

    player.playlist_deleted(&playlist.id);

    assert_eq!(player.view(), &View::All);
    assert!(player.library().playlists().is_empty());
}

#[test]
fn editing_current_song_updates_display() {
    let q = queue(&["draft"]);
    let mut player = player_with(q.clone());
    player.select_track(&q[0].id).unwrap();

    let mut edited = q[0].clone();
    edited.title = "final".to_string();
    player.song_updated(edited);

    assert_eq!(player.session().current_track().unwrap().title, "final");
    assert_eq!(player.library().songs()[0].title, "final");
}

#[test]
fn optimistic_favorite_round_trip() {
    let q = queue(&["a", "b"]);
    let mut player = player_with(q.clone());
    player.select_view(View::Favorites);
    assert!(player.queue().is_empty());

    let toggle = player.begin_favorite_toggle(&q[1].id);
    assert_eq!(player.queue().len(), 1);

    player.revert_favorite_toggle(&toggle);
    assert!(player.queue().is_empty());
}
