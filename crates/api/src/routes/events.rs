//! Route definitions for event search, suggestion and detail.

use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Event routes mounted at `/events`.
///
/// ```text
/// GET /search   -> search_events
/// GET /suggest  -> suggest_keywords
/// GET /{id}     -> get_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(events::search_events))
        .route("/suggest", get(events::suggest_keywords))
        .route("/{id}", get(events::get_event))
}
