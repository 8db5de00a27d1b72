//! The event search flow behind the search form.

use std::sync::Arc;

use gigscout_core::category;
use gigscout_core::event::{events_from_search_payload, EventSummary};
use gigscout_core::suggest::{suggestion_names, wants_suggestions};

use crate::api::{ApiClient, ClientError, SearchRequest};
use crate::geo::{Coordinates, GeoError, GeoLocator};

/// Radius, in miles, when the form leaves distance blank.
pub const DEFAULT_DISTANCE: &str = "10";

/// Category value that applies no segment filter.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Please enter a keyword.")]
    MissingKeyword,

    #[error("Please enter a location or enable auto-detect.")]
    MissingLocation,

    #[error("Could not resolve the search location: {0}")]
    Geo(#[from] GeoError),

    #[error("Failed to fetch events: {0}")]
    Client(#[from] ClientError),
}

/// What the user entered on the search form.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub keyword: String,
    pub category: String,
    pub distance: String,
    /// Free-text address, used only when `auto_detect` is off.
    pub location: String,
    pub auto_detect: bool,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            category: ALL_CATEGORIES.to_string(),
            distance: DEFAULT_DISTANCE.to_string(),
            location: String::new(),
            auto_detect: true,
        }
    }
}

impl SearchForm {
    /// Check the form before anything is sent.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.keyword.trim().is_empty() {
            return Err(SearchError::MissingKeyword);
        }
        if !self.auto_detect && self.location.trim().is_empty() {
            return Err(SearchError::MissingLocation);
        }
        Ok(())
    }

    fn radius(&self) -> String {
        let distance = self.distance.trim();
        if distance.is_empty() {
            DEFAULT_DISTANCE.to_string()
        } else {
            distance.to_string()
        }
    }
}

/// Runs searches against the API.
pub struct EventSearcher {
    api: Arc<ApiClient>,
    geo: GeoLocator,
}

impl EventSearcher {
    pub fn new(api: Arc<ApiClient>, geo: GeoLocator) -> Self {
        Self { api, geo }
    }

    /// Validate the form, resolve its origin and return the matching events.
    pub async fn search(&self, form: &SearchForm) -> Result<Vec<EventSummary>, SearchError> {
        form.validate()?;

        let origin = self.resolve_origin(form).await?;
        let request = SearchRequest {
            keyword: form.keyword.trim().to_string(),
            radius: form.radius(),
            lat: origin.lat,
            lng: origin.lng,
            segment_id: category::segment_id(&form.category),
        };

        let payload = self.api.search_events(&request).await?;
        let events = events_from_search_payload(&payload);

        tracing::debug!(keyword = %request.keyword, count = events.len(), "Search complete");
        Ok(events)
    }

    /// The search origin: the caller's IP location, or the typed address.
    pub async fn resolve_origin(&self, form: &SearchForm) -> Result<Coordinates, SearchError> {
        let origin = if form.auto_detect {
            self.geo.locate_by_ip().await?
        } else {
            self.geo.geocode(form.location.trim()).await?
        };
        Ok(origin)
    }

    /// Attraction and venue names for autocomplete.
    ///
    /// Keywords shorter than two characters are not sent. Failures yield an
    /// empty list.
    pub async fn suggest(&self, keyword: &str) -> Vec<String> {
        if !wants_suggestions(keyword) {
            return Vec::new();
        }
        match self.api.suggest(keyword.trim()).await {
            Ok(payload) => suggestion_names(&payload),
            Err(e) => {
                tracing::warn!(keyword, error = %e, "Suggestion request failed");
                Vec::new()
            }
        }
    }
}
