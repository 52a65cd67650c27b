/// Playlists API routes
use crate::{
    api::{MessageResponse, SongIdParam},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tunebox_core::{Playlist, PlaylistId, PlaylistWithSongs, SongId};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
}

/// GET /api/playlists
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Playlist>>> {
    let playlists = app_state.library.list_playlists(auth.user_id()).await?;
    Ok(Json(playlists))
}

/// POST /api/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(request): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Playlist>)> {
    let playlist = app_state
        .library
        .create_playlist(auth.user_id(), &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/playlists/:id
pub async fn get_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<PlaylistWithSongs>> {
    let playlist_id = PlaylistId::parse(&id)?;
    let playlist = app_state
        .library
        .get_playlist(auth.user_id(), &playlist_id)
        .await?;
    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    let playlist_id = PlaylistId::parse(&id)?;
    app_state
        .library
        .delete_playlist(auth.user_id(), &playlist_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Playlist deleted successfully",
    }))
}

/// POST /api/playlists/:id/songs
pub async fn add_song_to_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(body): Json<SongIdParam>,
) -> Result<Json<Playlist>> {
    let playlist_id = PlaylistId::parse(&id)?;
    let song_id = body.parse()?;

    let playlist = app_state
        .library
        .add_song_to_playlist(auth.user_id(), &playlist_id, &song_id)
        .await?;
    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id/songs/:song_id
pub async fn remove_song_from_playlist(
    Path((id, song_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Playlist>> {
    let playlist_id = PlaylistId::parse(&id)?;
    let song_id = SongId::parse(&song_id)?;

    let playlist = app_state
        .library
        .remove_song_from_playlist(auth.user_id(), &playlist_id, &song_id)
        .await?;
    Ok(Json(playlist))
}
