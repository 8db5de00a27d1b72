//! REST client for the Spotify Web API.
//!
//! Every call obtains a bearer token from the shared [`TokenProvider`]. A
//! 401 from the provider is reported as-is; the call is not retried with a
//! refreshed token.

use std::sync::Arc;

use serde_json::Value;

use crate::http::{endpoint, split_failure};
use crate::token::TokenProvider;

/// Public Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Album groups requested for an artist's catalog.
const ALBUM_GROUPS: &str = "album,single";

/// Market used to filter album availability.
const ALBUM_MARKET: &str = "US";

/// Page size for an artist's catalog.
const ALBUM_LIMIT: &str = "24";

/// Errors from the music provider layer.
#[derive(Debug, thiserror::Error)]
pub enum MusicError {
    /// No usable client credentials.
    #[error("Music provider authentication failed: {0}")]
    Auth(String),

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Music API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The configured API URL cannot be extended with a request path.
    #[error("Invalid music API URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client for the music provider.
pub struct SpotifyClient {
    client: reqwest::Client,
    api_url: String,
    tokens: Arc<TokenProvider>,
}

impl SpotifyClient {
    /// Create a client sharing `tokens` with any other call site.
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, tokens: Arc<TokenProvider>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Search artists by name, returning at most one match.
    pub async fn search_artists(&self, name: &str) -> Result<Value, MusicError> {
        self.get(&["search"], &[("q", name), ("type", "artist"), ("limit", "1")])
            .await
    }

    /// The best-matching artist for `name`, or `None` when nothing matched.
    pub async fn find_artist(&self, name: &str) -> Result<Option<Value>, MusicError> {
        let payload = self.search_artists(name).await?;
        Ok(payload.pointer("/artists/items/0").cloned())
    }

    /// Full artist record.
    pub async fn artist(&self, artist_id: &str) -> Result<Value, MusicError> {
        self.get(&["artists", artist_id], &[]).await
    }

    /// The artist's albums and singles.
    pub async fn artist_albums(&self, artist_id: &str) -> Result<Value, MusicError> {
        self.get(
            &["artists", artist_id, "albums"],
            &[
                ("include_groups", ALBUM_GROUPS),
                ("market", ALBUM_MARKET),
                ("limit", ALBUM_LIMIT),
            ],
        )
        .await
    }

    // ---- private helpers ----

    async fn get(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Value, MusicError> {
        let url = endpoint(&self.api_url, segments).map_err(MusicError::InvalidUrl)?;
        let token = self.tokens.get_token().await?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let response = split_failure(response)
            .await
            .map_err(|(status, body)| MusicError::Api { status, body })?;
        Ok(response.json::<Value>().await?)
    }
}
