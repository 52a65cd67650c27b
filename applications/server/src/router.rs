/// HTTP routing
use crate::{api, config::UploadSettings, middleware, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router.
///
/// Uploaded files are served read-only (with byte-range support) under
/// `/<url prefix>`, matching the references stored on songs.
pub fn create_router(app_state: AppState, uploads: &UploadSettings) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(api::health::health));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Songs
        .route("/songs", get(api::songs::list_songs))
        .route(
            "/songs/upload",
            post(api::songs::upload_song).layer(DefaultBodyLimit::max(uploads.max_upload_bytes)),
        )
        .route("/songs/:id", put(api::songs::update_song))
        .route("/songs/:id", delete(api::songs::delete_song))
        // Playlists
        .route("/playlists", get(api::playlists::list_playlists))
        .route("/playlists", post(api::playlists::create_playlist))
        .route("/playlists/:id", get(api::playlists::get_playlist))
        .route("/playlists/:id", delete(api::playlists::delete_playlist))
        .route(
            "/playlists/:id/songs",
            post(api::playlists::add_song_to_playlist),
        )
        .route(
            "/playlists/:id/songs/:song_id",
            delete(api::playlists::remove_song_from_playlist),
        )
        // Favorites
        .route("/favorites", get(api::favorites::list_favorites))
        .route("/favorites", post(api::favorites::add_favorite))
        .route("/favorites", delete(api::favorites::remove_favorite))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/", get(api::health::root))
        .nest("/api", public_routes.merge(protected_routes))
        .nest_service(
            &format!("/{}", uploads.prefix()),
            ServeDir::new(&uploads.directory),
        )
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
