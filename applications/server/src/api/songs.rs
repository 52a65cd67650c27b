/// Songs API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use tunebox_core::{Song, SongId, UpdateSong};
use tunebox_library::{DeleteReport, SongUpload};

/// `{message, song}` body for upload and update
#[derive(Debug, Serialize)]
pub struct SongMessage {
    pub message: &'static str,
    pub song: Song,
}

#[derive(Debug, Serialize)]
pub struct DeleteSongResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub report: DeleteReport,
}

/// GET /api/songs
pub async fn list_songs(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Song>>> {
    Ok(Json(app_state.library.list_songs().await?))
}

/// POST /api/songs/upload
/// Multipart form: `song` file plus optional `title`, `artist`, `album`, `duration`
pub async fn upload_song(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SongMessage>)> {
    let upload = parse_upload(&headers, body).await?;

    let song = app_state
        .library
        .upload_song(auth.user_id(), upload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SongMessage {
            message: "Song uploaded successfully",
            song,
        }),
    ))
}

/// PUT /api/songs/:id
pub async fn update_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(update): Json<UpdateSong>,
) -> Result<Json<SongMessage>> {
    let song_id = SongId::parse(&id)?;

    let song = app_state
        .library
        .update_song(auth.user_id(), &song_id, update)
        .await?;

    Ok(Json(SongMessage {
        message: "Song updated successfully",
        song,
    }))
}

/// DELETE /api/songs/:id
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<DeleteSongResponse>> {
    let song_id = SongId::parse(&id)?;

    let report = app_state
        .library
        .delete_song(auth.user_id(), &song_id)
        .await?;

    Ok(Json(DeleteSongResponse {
        message: "Song deleted successfully",
        report,
    }))
}

async fn parse_upload(headers: &HeaderMap, body: Bytes) -> Result<SongUpload> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ServerError::BadRequest("Expected multipart/form-data".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut upload = SongUpload::default();
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "song" => {
                upload.original_name = field.file_name().unwrap_or("").to_string();
                upload.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {}", e)))?
                    .to_vec();
                has_file = true;
            }
            "title" => upload.title = Some(read_text(field).await?),
            "artist" => upload.artist = Some(read_text(field).await?),
            "album" => upload.album = Some(read_text(field).await?),
            "duration" => {
                let raw = read_text(field).await?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    let seconds = raw.parse::<f64>().map_err(|_| {
                        ServerError::BadRequest(format!("Invalid duration: {}", raw))
                    })?;
                    upload.duration = Some(seconds);
                }
            }
            _ => {}
        }
    }

    if !has_file {
        return Err(ServerError::BadRequest("No audio file uploaded".to_string()));
    }

    Ok(upload)
}

async fn read_text(field: multer::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to read form field: {}", e)))
}
