use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status. Always `"ok"` while the process serves requests.
    pub status: &'static str,
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `"connected"` or `"unavailable"`.
    pub database: &'static str,
}

/// GET /api/health -- service status plus database reachability.
///
/// The service stays up without a database, so an unreachable database is
/// reported but does not change `status`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.favorites.as_deref() {
        Some(store) => store.health_check().await.is_ok(),
        None => false,
    };

    Json(HealthResponse {
        status: "ok",
        message: "Backend is running",
        version: env!("CARGO_PKG_VERSION"),
        database: if db_healthy { "connected" } else { "unavailable" },
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
