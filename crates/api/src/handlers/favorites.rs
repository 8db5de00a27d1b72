//! Handlers for the favorites list.
//!
//! Favorites are keyed by provider event id. Saving is an upsert and
//! deleting an absent favorite is not an error, so clients can repeat either
//! call safely.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gigscout_db::models::favorite::{NewFavorite, UpsertFavorite};
use serde_json::json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// GET /api/favorites
///
/// Every favorite, most recently added first.
pub async fn list_favorites(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let favorites = state.favorites()?.list().await?;

    Ok(Json(favorites))
}

/// POST /api/favorites
///
/// Create or replace the favorite for `eventId`. Responds 201 with the
/// stored record.
pub async fn upsert_favorite(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpsertFavorite>,
) -> AppResult<impl IntoResponse> {
    let favorite = NewFavorite::try_from(input)?;

    let saved = state.favorites()?.upsert(&favorite).await?;

    tracing::info!(event_id = %saved.event_id, name = %saved.name, "Favorite saved");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /api/favorites/{event_id}
///
/// Answers `{ "ok": true }` whether or not the favorite existed.
pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let removed = state.favorites()?.delete(&event_id).await?;

    tracing::info!(event_id = %event_id, removed, "Favorite deleted");

    Ok(Json(json!({ "ok": true })))
}
