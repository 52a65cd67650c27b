//! Tunebox Core
//!
//! Domain types, the library storage contract, and the error taxonomy shared
//! by the server, the consistency engine and the client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `Favorite` and their identifiers
//! - **Storage Contract**: the `LibraryStore` trait implemented by `tunebox-storage`
//! - **Error Handling**: `CoreError` with an `ErrorKind` for every failure the
//!   consistency engine can produce
//!
//! # Example
//!
//! ```rust
//! use tunebox_core::types::{CreateSong, SongId, UserId};
//!
//! let owner = UserId::new("user-1");
//! let song = CreateSong::new("Intro", "Unknown Artist", "uploads/intro.mp3", owner);
//! assert_eq!(song.title, "Intro");
//!
//! assert!(SongId::parse("not-an-id").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{CoreError, ErrorKind, Result};
pub use storage::{DetachReport, LibraryStore};

pub use types::{
    CreateSong, Favorite, FavoriteId, FavoriteStatus, Playlist, PlaylistId, PlaylistWithSongs,
    Song, SongId, UpdateSong, UserId, UNKNOWN_ARTIST,
};
