//! Query parameter types for API handlers.
//!
//! Every field is optional at the extractor level so missing parameters are
//! reported by the handlers with the project's error body rather than as an
//! extractor rejection.

use serde::Deserialize;

/// `GET /api/events/search?keyword&radius&lat&lng&segmentId`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub radius: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub segment_id: Option<String>,
}

/// `GET /api/events/suggest?keyword`.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub keyword: String,
}

/// `GET /api/spotify/lookup?name`.
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub name: String,
}
