#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use gigscout_api::config::{MusicConfig, ServerConfig, TicketingConfig};
use gigscout_api::router::build_app_router;
use gigscout_api::state::AppState;
use gigscout_db::store::{FavoriteStore, MemoryFavoriteStore};

/// Build a test `ServerConfig` whose providers all point at `provider_url`
/// (normally a mockito server).
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(provider_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        ticketing: TicketingConfig {
            api_key: Some("test-key".to_string()),
            base_url: provider_url.to_string(),
        },
        music: MusicConfig {
            client_id: Some("client-id".to_string()),
            client_secret: Some("client-secret".to_string()),
            api_url: format!("{provider_url}/v1"),
            token_url: format!("{provider_url}/api/token"),
        },
    }
}

/// Build the full application router backed by an in-memory favorites store.
pub fn build_test_app(provider_url: &str) -> Router {
    let store: Arc<dyn FavoriteStore> = Arc::new(MemoryFavoriteStore::new());
    build_app(test_config(provider_url), Some(store))
}

/// Build the full application router with no database connected.
pub fn build_test_app_without_db(provider_url: &str) -> Router {
    build_app(test_config(provider_url), None)
}

/// Build the router from an explicit config and store.
pub fn build_app(config: ServerConfig, favorites: Option<Arc<dyn FavoriteStore>>) -> Router {
    let state = AppState::new(config.clone(), favorites).expect("test HTTP client");
    build_app_router(state, &config)
}

/// A base URL nothing listens on, for tests that must not reach a provider.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

/// POST a raw body with an optional content type.
pub async fn post_raw(app: Router, uri: &str, body: &str, content_type: Option<&str>) -> Response {
    send(app, Method::POST, uri, Body::from(body.to_string()), content_type).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
