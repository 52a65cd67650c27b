//! Tunebox Server Library
//!
//! Music library server: songs, playlists and favorites per user, with
//! uploads stored on local disk and served back as static files.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::{auth::AuthService, file_storage::FileStorage};
pub use state::AppState;
