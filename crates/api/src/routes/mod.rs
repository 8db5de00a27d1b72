pub mod events;
pub mod favorites;
pub mod health;
pub mod spotify;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                              service status
///
/// /events/search                       event search (provider passthrough)
/// /events/suggest                      keyword suggestions (never fails)
/// /events/{id}                         event detail (provider passthrough)
///
/// /favorites                           list, upsert
/// /favorites/{event_id}                delete
///
/// /spotify/lookup                      best artist match by name
/// /spotify/artist/{id}                 artist detail
/// /spotify/artist/{id}/albums          artist albums
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/events", events::router())
        .nest("/favorites", favorites::router())
        .nest("/spotify", spotify::router())
}
