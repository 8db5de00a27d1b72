use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use gigscout_db::store::{FavoriteStore, PgFavoriteStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gigscout_api::config::ServerConfig;
use gigscout_api::router::build_app_router;
use gigscout_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    if config.ticketing.api_key.is_none() {
        tracing::warn!("TM_API_KEY is not set; event routes will fail");
    }
    if config.music.credentials().is_none() {
        tracing::warn!("SPOTIFY_CLIENT_ID/SPOTIFY_CLIENT_SECRET are not set; artist routes will fail");
    }

    // --- Database ---
    let favorites = connect_favorites(config.database_url.as_deref()).await;

    // --- App state ---
    let state = AppState::new(config.clone(), favorites)
        .context("Failed to build provider HTTP client")?;

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gigscout_api=debug,gigscout_providers=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect to Postgres and apply migrations.
///
/// Any failure is logged and yields `None`: the server still starts and
/// serves every route that does not need the database.
async fn connect_favorites(database_url: Option<&str>) -> Option<Arc<dyn FavoriteStore>> {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL is not set; running without a database");
        return None;
    };

    let pool = match gigscout_db::create_pool(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Database connection failed; running without a database");
            return None;
        }
    };
    tracing::info!("Database connection pool created");

    if let Err(e) = gigscout_db::run_migrations(&pool).await {
        tracing::error!(error = %e, "Database migrations failed; running without a database");
        return None;
    }
    tracing::info!("Database migrations applied");

    let store: Arc<dyn FavoriteStore> = Arc::new(PgFavoriteStore::new(pool));
    Some(store)
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
