//! Tunebox Client
//!
//! HTTP client library for the Tunebox server API.
//!
//! # Features
//!
//! - **Library**: list, edit and delete songs; playlists and membership;
//!   favorites
//! - **Upload**: send audio files with optional metadata
//! - **Controller**: keeps a [`tunebox_playback::Player`] in step with the
//!   server, including optimistic favorite toggles
//!
//! # Example
//!
//! ```ignore
//! use tunebox_client::{ClientConfig, PlayerController, TuneboxClient};
//! use tunebox_playback::{Player, SessionConfig};
//!
//! let client = TuneboxClient::new(ClientConfig::with_token("http://localhost:3003", token))?;
//! let mut controller = PlayerController::new(client, Player::new(media, SessionConfig::default()));
//!
//! controller.refresh().await?;
//! let first = controller.player().queue()[0].id.clone();
//! controller.toggle_favorite(&first).await?;
//! ```

mod client;
mod controller;
mod error;
mod library;
mod types;
mod upload;

pub use client::{LibraryClientHandle, TuneboxClient, UploadClientHandle};
pub use controller::PlayerController;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, HealthResponse, MessageResponse, SongResponse, UploadMetadata};

pub use library::LibraryClient;
pub use upload::UploadClient;
