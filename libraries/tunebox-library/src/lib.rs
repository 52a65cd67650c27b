//! Tunebox Library
//!
//! Consistency Engine for the shared music library: ownership checks,
//! uniqueness of favorites and playlist membership, and cascading song
//! deletion, layered over any [`tunebox_core::LibraryStore`] and a
//! [`FileStore`] for the audio bytes.
//!
//! Check-then-act sequences are serialized per playlist and per
//! (user, song) with [`KeyedLocks`]; the store's own uniqueness constraints
//! back them up across processes.

#![forbid(unsafe_code)]

mod files;
mod locks;
mod service;

pub use files::{generate_file_name, FileStore};
pub use locks::KeyedLocks;
pub use service::{DeleteReport, LibraryService, SongUpload};
