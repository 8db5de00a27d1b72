//! Client-credentials access token cache for the music provider.
//!
//! A single [`TokenProvider`] is built per process and shared by every call
//! site. It hands out the cached token while it has more than
//! [`EXPIRY_MARGIN`] left and performs a fresh exchange otherwise.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::http::split_failure;
use crate::music::MusicError;

/// Public Spotify accounts token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// A cached token is treated as expired this long before its real expiry.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(5);

/// Client id and secret for the client-credentials grant.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Token endpoint response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Lifetime in seconds.
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + EXPIRY_MARGIN < self.expires_at
    }
}

/// Lazily refreshed bearer token for the music provider.
pub struct TokenProvider {
    client: reqwest::Client,
    token_url: String,
    credentials: Option<ClientCredentials>,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Create a provider. `credentials: None` makes [`get_token`](Self::get_token)
    /// fail with [`MusicError::Auth`] without contacting the token endpoint.
    pub fn new(
        client: reqwest::Client,
        token_url: impl Into<String>,
        credentials: Option<ClientCredentials>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Return a token valid for at least [`EXPIRY_MARGIN`], exchanging
    /// credentials for a new one when needed.
    ///
    /// The cache lock is held across the exchange, so concurrent callers that
    /// find the token stale wait for one refresh rather than each running
    /// their own.
    pub async fn get_token(&self) -> Result<String, MusicError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value.clone());
        }

        let fresh = self.exchange().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn exchange(&self) -> Result<CachedToken, MusicError> {
        let credentials = self
            .credentials
            .as_ref()
            .filter(|c| !c.client_id.is_empty() && !c.client_secret.is_empty())
            .ok_or_else(|| MusicError::Auth("music provider client id/secret are not configured".into()))?;

        tracing::debug!(token_url = %self.token_url, "Requesting music provider access token");

        let requested_at = Instant::now();
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let response = split_failure(response)
            .await
            .map_err(|(status, body)| MusicError::Api { status, body })?;
        let body: TokenResponse = response.json().await?;

        tracing::info!(expires_in = body.expires_in, "Music provider access token refreshed");

        Ok(CachedToken {
            value: body.access_token,
            expires_at: requested_at + Duration::from_secs(body.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use mockito::{Matcher, Server};

    fn credentials() -> Option<ClientCredentials> {
        Some(ClientCredentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
        })
    }

    /// `id:secret` base64-encoded.
    const BASIC_AUTH: &str = "Basic aWQ6c2VjcmV0";

    #[tokio::test]
    async fn reuses_token_within_validity_window() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token")
            .match_header("authorization", BASIC_AUTH)
            .match_body(Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()))
            .with_status(200)
            .with_body(r#"{"access_token":"tok-1","token_type":"Bearer","expires_in":3600}"#)
            .expect(1)
            .create_async()
            .await;

        let tokens = TokenProvider::new(
            reqwest::Client::new(),
            format!("{}/api/token", server.url()),
            credentials(),
        );

        assert_eq!(tokens.get_token().await.unwrap(), "tok-1");
        assert_eq!(tokens.get_token().await.unwrap(), "tok-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn refreshes_after_expiry() {
        let mut server = Server::new_async().await;
        // Six seconds of lifetime leaves one second outside the safety margin.
        let mock = server
            .mock("POST", "/api/token")
            .with_status(200)
            .with_body(r#"{"access_token":"short","expires_in":6}"#)
            .expect(2)
            .create_async()
            .await;

        let tokens = TokenProvider::new(
            reqwest::Client::new(),
            format!("{}/api/token", server.url()),
            credentials(),
        );

        tokens.get_token().await.unwrap();
        tokens.get_token().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        tokens.get_token().await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn token_inside_safety_margin_is_never_reused() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token")
            .with_status(200)
            .with_body(r#"{"access_token":"almost-gone","expires_in":5}"#)
            .expect(2)
            .create_async()
            .await;

        let tokens = TokenProvider::new(
            reqwest::Client::new(),
            format!("{}/api/token", server.url()),
            credentials(),
        );

        tokens.get_token().await.unwrap();
        tokens.get_token().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_credentials_is_auth_error() {
        let tokens = TokenProvider::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
        assert_matches!(tokens.get_token().await, Err(MusicError::Auth(_)));
    }

    #[tokio::test]
    async fn rejected_exchange_is_not_cached() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token")
            .with_status(400)
            .with_body(r#"{"error":"invalid_client"}"#)
            .expect(2)
            .create_async()
            .await;

        let tokens = TokenProvider::new(
            reqwest::Client::new(),
            format!("{}/api/token", server.url()),
            credentials(),
        );

        assert_matches!(tokens.get_token().await, Err(MusicError::Api { status: 400, .. }));
        assert_matches!(tokens.get_token().await, Err(MusicError::Api { status: 400, .. }));
        mock.assert_async().await;
    }
}
