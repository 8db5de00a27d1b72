use std::str::FromStr;

use gigscout_providers::{music, ticketing, token};

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Ticketing provider settings.
#[derive(Debug, Clone)]
pub struct TicketingConfig {
    /// Discovery API key (`TM_API_KEY`). Event routes fail without it.
    pub api_key: Option<String>,
    /// Discovery API root (`TICKETMASTER_BASE_URL`).
    pub base_url: String,
}

/// Music provider settings.
#[derive(Clone)]
pub struct MusicConfig {
    /// `SPOTIFY_CLIENT_ID`.
    pub client_id: Option<String>,
    /// `SPOTIFY_CLIENT_SECRET`.
    pub client_secret: Option<String>,
    /// Web API root (`SPOTIFY_API_URL`).
    pub api_url: String,
    /// Token endpoint (`SPOTIFY_TOKEN_URL`).
    pub token_url: String,
}

impl std::fmt::Debug for MusicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl MusicConfig {
    /// Client credentials, when both halves are configured.
    pub fn credentials(&self) -> Option<token::ClientCredentials> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some(token::ClientCredentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => None,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Provider secrets
/// and the database URL have no default; their absence disables the routes
/// that need them instead of stopping the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres connection string (`DATABASE_URL`).
    pub database_url: Option<String>,
    pub ticketing: TicketingConfig,
    pub music: MusicConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                      |
    /// |-------------------------|----------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                    |
    /// | `PORT`                  | `8080`                                       |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`                      |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                         |
    /// | `DATABASE_URL`          | unset                                        |
    /// | `TM_API_KEY`            | unset                                        |
    /// | `TICKETMASTER_BASE_URL` | `https://app.ticketmaster.com/discovery/v2`  |
    /// | `SPOTIFY_CLIENT_ID`     | unset                                        |
    /// | `SPOTIFY_CLIENT_SECRET` | unset                                        |
    /// | `SPOTIFY_API_URL`       | `https://api.spotify.com/v1`                 |
    /// | `SPOTIFY_TOKEN_URL`     | `https://accounts.spotify.com/api/token`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(var("PORT"), "PORT", "u16", 8080)?;
        let request_timeout_secs =
            parse_or(var("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", "u64", 30)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let ticketing = TicketingConfig {
            api_key: var("TM_API_KEY"),
            base_url: var("TICKETMASTER_BASE_URL")
                .unwrap_or_else(|| ticketing::DEFAULT_BASE_URL.into()),
        };

        let music = MusicConfig {
            client_id: var("SPOTIFY_CLIENT_ID"),
            client_secret: var("SPOTIFY_CLIENT_SECRET"),
            api_url: var("SPOTIFY_API_URL").unwrap_or_else(|| music::DEFAULT_API_URL.into()),
            token_url: var("SPOTIFY_TOKEN_URL").unwrap_or_else(|| token::DEFAULT_TOKEN_URL.into()),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url: var("DATABASE_URL"),
            ticketing,
            music,
        })
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}
