mod favorite;
mod ids;
mod playlist;
mod song;

pub use favorite::{Favorite, FavoriteStatus};
pub use ids::{FavoriteId, PlaylistId, SongId, UserId};
pub use playlist::{Playlist, PlaylistWithSongs};
pub use song::{CreateSong, Song, UpdateSong, UNKNOWN_ARTIST};
