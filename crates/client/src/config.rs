/// Default API root when `API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// IP geolocation service root.
pub const DEFAULT_IPINFO_URL: &str = "https://ipinfo.io";

/// Forward geocoding endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Client library settings.
#[derive(Clone)]
pub struct ClientConfig {
    /// gigscout API root, including the `/api` prefix.
    pub api_base_url: String,
    /// `IPINFO_TOKEN`; requests go out unauthenticated without it.
    pub ipinfo_token: Option<String>,
    /// `GOOGLE_GEOCODE_API_KEY`; typed locations cannot be resolved without it.
    pub geocode_api_key: Option<String>,
    pub ipinfo_url: String,
    pub geocode_url: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("ipinfo_token", &self.ipinfo_token.as_ref().map(|_| "<redacted>"))
            .field("geocode_api_key", &self.geocode_api_key.as_ref().map(|_| "<redacted>"))
            .field("ipinfo_url", &self.ipinfo_url)
            .field("geocode_url", &self.geocode_url)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ClientConfig {
    /// Load from `API_BASE_URL`, `IPINFO_TOKEN`, `GOOGLE_GEOCODE_API_KEY`,
    /// `IPINFO_URL` and `GEOCODE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_base_url: var("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into()),
            ipinfo_token: var("IPINFO_TOKEN"),
            geocode_api_key: var("GOOGLE_GEOCODE_API_KEY"),
            ipinfo_url: var("IPINFO_URL").unwrap_or_else(|| DEFAULT_IPINFO_URL.into()),
            geocode_url: var("GEOCODE_URL").unwrap_or_else(|| DEFAULT_GEOCODE_URL.into()),
        }
    }
}
