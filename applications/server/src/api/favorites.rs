/// Favorites API routes
use crate::{
    api::{MessageResponse, SongIdParam},
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tunebox_core::{Favorite, Song};

/// GET /api/favorites
pub async fn list_favorites(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Song>>> {
    let songs = app_state.library.list_favorites(auth.user_id()).await?;
    Ok(Json(songs))
}

/// POST /api/favorites
pub async fn add_favorite(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(body): Json<SongIdParam>,
) -> Result<(StatusCode, Json<Favorite>)> {
    let song_id = body.parse()?;
    let favorite = app_state
        .library
        .add_favorite(auth.user_id(), &song_id)
        .await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// DELETE /api/favorites?songId=...
/// The id may also come in a JSON body.
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<SongIdParam>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let param = if query.song_id.is_some() || body.is_empty() {
        query
    } else {
        serde_json::from_slice::<SongIdParam>(&body)
            .map_err(|e| ServerError::BadRequest(format!("Invalid request body: {}", e)))?
    };
    let song_id = param.parse()?;

    app_state
        .library
        .remove_favorite(auth.user_id(), &song_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Favorite removed",
    }))
}
