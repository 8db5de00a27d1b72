//! Handlers for artist lookups on the music provider.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::query::LookupParams;
use crate::state::AppState;

/// GET /api/spotify/lookup
///
/// The best-matching artist for `name` as `{ "artist": … }`, `null` when
/// nothing matched.
pub async fn lookup_artist(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> AppResult<impl IntoResponse> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }

    let artist = state
        .music
        .find_artist(name)
        .await
        .map_err(AppError::music("Spotify lookup failed"))?;

    Ok(Json(json!({ "artist": artist })))
}

/// GET /api/spotify/artist/{id}
pub async fn get_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let artist = state
        .music
        .artist(&artist_id)
        .await
        .map_err(AppError::music("Spotify artist failed"))?;

    Ok(Json(artist))
}

/// GET /api/spotify/artist/{id}/albums
pub async fn get_artist_albums(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let albums = state
        .music
        .artist_albums(&artist_id)
        .await
        .map_err(AppError::music("Spotify albums failed"))?;

    Ok(Json(albums))
}
