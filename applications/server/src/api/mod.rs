/// API route modules
pub mod favorites;
pub mod health;
pub mod playlists;
pub mod songs;

use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use tunebox_core::SongId;

/// `{songId}` request body or query
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongIdParam {
    #[serde(default)]
    pub song_id: Option<String>,
}

impl SongIdParam {
    /// The parsed id; `InvalidArgument` when missing or malformed
    pub fn parse(&self) -> Result<SongId> {
        let raw = self
            .song_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ServerError::BadRequest("songId is required".to_string()))?;
        Ok(SongId::parse(raw)?)
    }
}

/// `{message}` acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
