//! Route definitions for favorites.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Favorites routes mounted at `/favorites`.
///
/// ```text
/// GET    /             -> list_favorites
/// POST   /             -> upsert_favorite
/// DELETE /{event_id}   -> delete_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(favorites::list_favorites).post(favorites::upsert_favorite),
        )
        .route("/{event_id}", delete(favorites::delete_favorite))
}
