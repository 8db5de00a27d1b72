use std::sync::Arc;
use std::time::Duration;

use gigscout_db::store::FavoriteStore;
use gigscout_providers::music::SpotifyClient;
use gigscout_providers::ticketing::TicketmasterClient;
use gigscout_providers::token::TokenProvider;

use crate::config::ServerConfig;
use crate::error::AppError;

/// Connect timeout for outbound provider requests.
const PROVIDER_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Favorites store; `None` when no database is connected.
    pub favorites: Option<Arc<dyn FavoriteStore>>,
    /// Ticketing provider client.
    pub ticketing: Arc<TicketmasterClient>,
    /// Music provider client (owns the process-wide token cache).
    pub music: Arc<SpotifyClient>,
}

impl AppState {
    /// Build the provider clients from configuration.
    ///
    /// Both clients share one connection pool; the music client gets the one
    /// [`TokenProvider`] for the process.
    pub fn new(
        config: ServerConfig,
        favorites: Option<Arc<dyn FavoriteStore>>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(PROVIDER_CONNECT_TIMEOUT)
            .user_agent(concat!("gigscout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let ticketing = TicketmasterClient::new(
            http.clone(),
            config.ticketing.base_url.clone(),
            config.ticketing.api_key.clone(),
        );

        let tokens = TokenProvider::new(
            http.clone(),
            config.music.token_url.clone(),
            config.music.credentials(),
        );
        let music = SpotifyClient::new(http, config.music.api_url.clone(), Arc::new(tokens));

        Ok(Self {
            config: Arc::new(config),
            favorites,
            ticketing: Arc::new(ticketing),
            music: Arc::new(music),
        })
    }

    /// The favorites store, or [`AppError::DatabaseUnavailable`].
    pub fn favorites(&self) -> Result<&dyn FavoriteStore, AppError> {
        self.favorites
            .as_deref()
            .ok_or(AppError::DatabaseUnavailable)
    }
}
