//! REST client for the Ticketmaster Discovery API.
//!
//! Every request is signed with the `apikey` query parameter. Payloads are
//! returned as raw [`serde_json::Value`] so the API layer can pass them
//! through unchanged.

use gigscout_core::suggest::{empty_suggestions, is_blank_keyword};
use serde_json::Value;

use crate::http::{endpoint, split_failure};

/// Public Discovery API base URL.
pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

/// Distance unit sent with every search; the radius is interpreted in it.
const RADIUS_UNIT: &str = "miles";

/// Errors from the ticketing provider layer.
#[derive(Debug, thiserror::Error)]
pub enum TicketingError {
    /// `TM_API_KEY` was not configured.
    #[error("Ticketing API key is not configured")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Ticketing API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The configured base URL cannot be extended with a request path.
    #[error("Invalid ticketing URL: {0}")]
    InvalidUrl(String),
}

impl TicketingError {
    /// Whether the provider rejected the call for exceeding its rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { status: 429, .. })
    }
}

/// Parameters for an event search.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSearch {
    pub keyword: String,
    pub radius: String,
    pub lat: f64,
    pub lng: f64,
    pub segment_id: Option<String>,
}

/// HTTP client for the ticketing provider.
pub struct TicketmasterClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TicketmasterClient {
    /// Create a client.
    ///
    /// * `base_url` - Discovery API root, e.g. [`DEFAULT_BASE_URL`].
    /// * `api_key` - `None` makes every call fail with
    ///   [`TicketingError::MissingApiKey`] instead of reaching the network.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Search events around a point.
    ///
    /// Sends `GET /events.json` with `keyword`, `radius`, `unit=miles`,
    /// `latlong=<lat>,<lng>` and, when given, `segmentId`.
    pub async fn search_events(&self, search: &EventSearch) -> Result<Value, TicketingError> {
        let api_key = self.api_key()?;
        let latlong = format!("{},{}", search.lat, search.lng);

        let mut query: Vec<(&str, &str)> = vec![
            ("apikey", api_key),
            ("keyword", search.keyword.as_str()),
            ("radius", search.radius.as_str()),
            ("unit", RADIUS_UNIT),
            ("latlong", latlong.as_str()),
        ];
        if let Some(segment_id) = search.segment_id.as_deref() {
            query.push(("segmentId", segment_id));
        }

        let response = self
            .client
            .get(self.url(&["events.json"])?)
            .query(&query)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the full provider record for one event.
    pub async fn event_details(&self, event_id: &str) -> Result<Value, TicketingError> {
        let api_key = self.api_key()?;
        let resource = format!("{event_id}.json");

        let response = self
            .client
            .get(self.url(&["events", resource.as_str()])?)
            .query(&[("apikey", api_key)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Keyword suggestions for autocomplete, degrading to an empty payload.
    ///
    /// Blank keywords never reach the provider. Rate limiting and every other
    /// failure are logged and answered with
    /// [`empty_suggestions`](gigscout_core::suggest::empty_suggestions).
    pub async fn suggest(&self, keyword: &str) -> Value {
        if is_blank_keyword(keyword) {
            return empty_suggestions();
        }

        match self.try_suggest(keyword).await {
            Ok(payload) => payload,
            Err(e) if e.is_rate_limited() => {
                tracing::warn!(keyword, "Ticketing provider rate limited suggest, returning empty lists");
                empty_suggestions()
            }
            Err(e) => {
                tracing::error!(keyword, error = %e, "Keyword suggestion failed, returning empty lists");
                empty_suggestions()
            }
        }
    }

    /// Keyword suggestions, surfacing every failure.
    pub async fn try_suggest(&self, keyword: &str) -> Result<Value, TicketingError> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(self.url(&["suggest"])?)
            .query(&[("apikey", api_key), ("keyword", keyword)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn api_key(&self) -> Result<&str, TicketingError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(TicketingError::MissingApiKey)
    }

    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, TicketingError> {
        endpoint(&self.base_url, segments).map_err(TicketingError::InvalidUrl)
    }

    async fn parse_response(response: reqwest::Response) -> Result<Value, TicketingError> {
        let response = split_failure(response)
            .await
            .map_err(|(status, body)| TicketingError::Api { status, body })?;
        Ok(response.json::<Value>().await?)
    }
}
