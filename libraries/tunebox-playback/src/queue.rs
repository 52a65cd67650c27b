//! Playback Queue Resolver
//!
//! The queue is never stored: it is recomputed from the library, the
//! selected view and the search term whenever any of them changes.

use crate::types::View;
use std::collections::HashSet;
use tunebox_core::{Playlist, Song, SongId};

/// Songs playable under `view`, narrowed by `search`.
///
/// Output always follows the order of `songs` (the all-songs order): the
/// favorites set carries no order of its own and playlist membership order
/// is ignored for display. An unknown playlist yields an empty queue. The
/// search is a case-insensitive substring match on title or artist; a
/// blank search matches everything.
pub fn resolve_queue(
    songs: &[Song],
    playlists: &[Playlist],
    favorites: &HashSet<SongId>,
    view: &View,
    search: &str,
) -> Vec<Song> {
    let needle = search.trim().to_lowercase();
    let matches_search = |song: &Song| needle.is_empty() || song.matches_lowercase(&needle);

    // None admits every song
    let members: Option<HashSet<&SongId>> = match view {
        View::All => None,
        View::Favorites => Some(favorites.iter().collect()),
        View::Playlist(id) => match playlists.iter().find(|p| &p.id == id) {
            Some(playlist) => Some(playlist.songs.iter().collect()),
            None => return Vec::new(),
        },
    };

    songs
        .iter()
        .filter(|&song| {
            members.as_ref().map_or(true, |m| m.contains(&song.id)) && matches_search(song)
        })
        .cloned()
        .collect()
}
