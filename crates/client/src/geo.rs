//! Origin resolution for searches: IP geolocation and forward geocoding.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::http::split_failure;

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Used when IP geolocation answers without a `loc` field.
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    lat: 34.0211,
    lng: -118.2890,
};

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Geolocation service error ({status}): {body}")]
    Api { status: u16, body: String },

    /// `GOOGLE_GEOCODE_API_KEY` was not configured.
    #[error("Geocoding API key is not configured")]
    MissingApiKey,

    #[error("No geocoding results for that address")]
    NoResults,

    #[error("Malformed location '{0}'")]
    InvalidLocation(String),
}

/// Resolves search origins.
pub struct GeoLocator {
    client: reqwest::Client,
    ipinfo_url: String,
    ipinfo_token: Option<String>,
    geocode_url: String,
    geocode_api_key: Option<String>,
}

impl GeoLocator {
    pub fn new(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            ipinfo_url: config.ipinfo_url.trim_end_matches('/').to_string(),
            ipinfo_token: config.ipinfo_token.clone(),
            geocode_url: config.geocode_url.clone(),
            geocode_api_key: config.geocode_api_key.clone(),
        }
    }

    /// Approximate position of the caller's public IP.
    ///
    /// Falls back to [`FALLBACK_COORDINATES`] when the service does not
    /// report a location.
    pub async fn locate_by_ip(&self) -> Result<Coordinates, GeoError> {
        let mut request = self.client.get(format!("{}/json", self.ipinfo_url));
        if let Some(token) = self.ipinfo_token.as_deref() {
            request = request.query(&[("token", token)]);
        }

        let payload = Self::parse_response(request.send().await?).await?;

        match payload.get("loc").and_then(Value::as_str) {
            Some(loc) => parse_loc(loc),
            None => {
                tracing::debug!("IP geolocation returned no loc, using fallback origin");
                Ok(FALLBACK_COORDINATES)
            }
        }
    }

    /// Coordinates of the first geocoding result for `address`.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, GeoError> {
        let key = self
            .geocode_api_key
            .as_deref()
            .ok_or(GeoError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.geocode_url)
            .query(&[("address", address), ("key", key)])
            .send()
            .await?;
        let payload = Self::parse_response(response).await?;

        let location = payload
            .pointer("/results/0/geometry/location")
            .ok_or(GeoError::NoResults)?;

        match (
            location.get("lat").and_then(Value::as_f64),
            location.get("lng").and_then(Value::as_f64),
        ) {
            (Some(lat), Some(lng)) => Ok(Coordinates { lat, lng }),
            _ => Err(GeoError::InvalidLocation(location.to_string())),
        }
    }

    async fn parse_response(response: reqwest::Response) -> Result<Value, GeoError> {
        let response = split_failure(response)
            .await
            .map_err(|(status, body)| GeoError::Api { status, body })?;
        Ok(response.json().await?)
    }
}

/// Parse an ipinfo-style `"lat,lng"` string.
fn parse_loc(loc: &str) -> Result<Coordinates, GeoError> {
    let invalid = || GeoError::InvalidLocation(loc.to_string());

    let (lat, lng) = loc.split_once(',').ok_or_else(invalid)?;
    let lat = lat.trim().parse().map_err(|_| invalid())?;
    let lng = lng.trim().parse().map_err(|_| invalid())?;

    Ok(Coordinates { lat, lng })
}
