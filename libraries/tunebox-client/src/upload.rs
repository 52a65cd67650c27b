//! Song upload for a Tunebox server.

use crate::error::{map_send_error, read_json, ClientError, Result};
use crate::types::{SongResponse, UploadMetadata};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info};
use tunebox_core::Song;

/// Upload client for a Tunebox server.
pub struct UploadClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Upload an audio file read from disk.
    pub async fn upload_file(&self, file_path: &Path, metadata: &UploadMetadata) -> Result<Song> {
        if !file_path.exists() {
            return Err(ClientError::FileNotFound(file_path.display().to_string()));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("song")
            .to_string();

        debug!(file = %file_path.display(), "Uploading song");
        let contents = tokio::fs::read(file_path).await?;

        self.upload_bytes(&file_name, contents, metadata).await
    }

    /// Upload audio bytes under `file_name`.
    ///
    /// Fields left unset in `metadata` are defaulted by the server.
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        metadata: &UploadMetadata,
    ) -> Result<Song> {
        let size = contents.len();
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(mime_type_for_file(Path::new(file_name)))?;

        let mut form = Form::new().part("song", part);
        if let Some(title) = &metadata.title {
            form = form.text("title", title.clone());
        }
        if let Some(artist) = &metadata.artist {
            form = form.text("artist", artist.clone());
        }
        if let Some(album) = &metadata.album {
            form = form.text("album", album.clone());
        }
        if let Some(duration) = metadata.duration {
            form = form.text("duration", duration.to_string());
        }

        let url = format!("{}/api/songs/upload", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        let body: SongResponse = read_json(response, "upload response").await?;

        info!(
            song_id = %body.song.id,
            file = %file_name,
            size,
            "Song uploaded"
        );
        Ok(body.song)
    }
}

/// Get MIME type for audio file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("m4a" | "aac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
