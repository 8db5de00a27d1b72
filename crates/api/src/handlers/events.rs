//! Handlers for event search, keyword suggestion and event detail.
//!
//! All three pass the ticketing provider's payload through unchanged.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use gigscout_providers::ticketing::EventSearch;

use crate::error::{AppError, AppResult};
use crate::query::{SearchParams, SuggestParams};
use crate::state::AppState;

/// GET /api/events/search
///
/// `keyword`, `radius`, `lat` and `lng` are required; the provider is not
/// called unless all four are present.
pub async fn search_events(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let search = validate_search(params)?;

    tracing::debug!(
        keyword = %search.keyword,
        radius = %search.radius,
        lat = search.lat,
        lng = search.lng,
        segment_id = ?search.segment_id,
        "Searching events",
    );

    let payload = state
        .ticketing
        .search_events(&search)
        .await
        .map_err(AppError::ticketing("Ticketmaster search failed"))?;

    Ok(Json(payload))
}

/// GET /api/events/suggest
///
/// Always answers 200; failures degrade to empty suggestion lists.
pub async fn suggest_keywords(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> impl IntoResponse {
    Json(state.ticketing.suggest(&params.keyword).await)
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let payload = state
        .ticketing
        .event_details(&event_id)
        .await
        .map_err(AppError::ticketing("Ticketmaster event details failed"))?;

    Ok(Json(payload))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check the required search parameters and convert the coordinates.
fn validate_search(params: SearchParams) -> AppResult<EventSearch> {
    let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    let (Some(keyword), Some(radius), Some(lat), Some(lng)) = (
        present(params.keyword),
        present(params.radius),
        present(params.lat),
        present(params.lng),
    ) else {
        return Err(AppError::BadRequest("Missing required parameters".into()));
    };

    let (Ok(lat), Ok(lng)) = (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) else {
        return Err(AppError::BadRequest("lat and lng must be numbers".into()));
    };

    Ok(EventSearch {
        keyword,
        radius,
        lat,
        lng,
        segment_id: present(params.segment_id),
    })
}
