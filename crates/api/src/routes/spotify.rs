//! Route definitions for artist lookups on the music provider.

use axum::routing::get;
use axum::Router;

use crate::handlers::spotify;
use crate::state::AppState;

/// Music routes mounted at `/spotify`.
///
/// ```text
/// GET /lookup              -> lookup_artist
/// GET /artist/{id}         -> get_artist
/// GET /artist/{id}/albums  -> get_artist_albums
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lookup", get(spotify::lookup_artist))
        .route("/artist/{id}", get(spotify::get_artist))
        .route("/artist/{id}/albums", get(spotify::get_artist_albums))
}
