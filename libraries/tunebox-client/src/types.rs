//! Types for Tunebox server API requests and responses.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tunebox_core::{Song, SongId, UNKNOWN_ARTIST};

/// Configuration for connecting to a Tunebox server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "http://localhost:3003")
    pub url: String,
    /// Bearer token issued for the user
    pub access_token: Option<String>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
        }
    }
}

/// Response from `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `{message}` acknowledgement body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{message, song}` body returned by upload and update.
#[derive(Debug, Clone, Deserialize)]
pub struct SongResponse {
    pub message: String,
    pub song: Song,
}

/// Body naming a song, for playlist membership and favorites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRef<'a> {
    pub song_id: &'a SongId,
}

/// Body for playlist creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
}

/// Metadata sent alongside an uploaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Seconds
    pub duration: Option<f64>,
}

impl UploadMetadata {
    /// Defaults for a file picked from disk: the file stem as title and
    /// the unknown-artist sentinel.
    pub fn for_file(path: &Path) -> Self {
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);

        Self {
            title,
            artist: Some(UNKNOWN_ARTIST.to_string()),
            ..Self::default()
        }
    }
}
