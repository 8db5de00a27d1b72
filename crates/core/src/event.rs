//! The Event Summary shape and its extraction from ticketing-provider JSON.
//!
//! An [`EventSummary`] is what the client renders on event cards and what it
//! sends to the favorites endpoints. Provider events are deeply nested; the
//! helpers here pull out the handful of fields the application uses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Genre shown when the provider event carries no classification segment.
pub const DEFAULT_GENRE: &str = "N/A";

/// Normalized event fields used across client and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Provider-assigned event id. Favorite records call it `eventId`.
    #[serde(alias = "eventId")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl EventSummary {
    /// Build a summary from a single provider event object.
    ///
    /// Returns `None` when the event has no `id` or `name`, since such an
    /// entry can be neither rendered nor favorited.
    pub fn from_provider_event(event: &Value) -> Option<Self> {
        let id = event.get("id")?.as_str()?.to_string();
        let name = event.get("name")?.as_str()?.to_string();

        let start = event.pointer("/dates/start");
        let date = start.and_then(|s| string_at(s, "/localDate"));
        let time = start.and_then(|s| string_at(s, "/localTime"));
        let venue = string_at(event, "/_embedded/venues/0/name");
        let genre = string_at(event, "/classifications/0/segment/name")
            .or_else(|| Some(DEFAULT_GENRE.to_string()));
        let image_url = string_at(event, "/images/0/url");

        Some(Self {
            id,
            name,
            date,
            time,
            venue,
            genre,
            image_url,
        })
    }
}

/// Display fields for one provider event record.
///
/// `summary` is what gets favorited from the detail view: the same mapping
/// as search results, except the image falls back to the seat map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub summary: EventSummary,
    /// Segment, genre and sub-genre names of the first classification,
    /// joined with `", "`.
    pub genres: Option<String>,
    /// First price range, `"<min>–<max> <currency>"` or `"<min> <currency>"`.
    pub price_range: Option<String>,
    /// Sale status code, e.g. `onsale`.
    pub status: Option<String>,
    /// Attraction names joined with `", "`.
    pub artists: Option<String>,
    pub ticket_url: Option<String>,
    pub seatmap_url: Option<String>,
}

impl EventDetails {
    /// Project a provider event record. `None` without an `id` or `name`.
    pub fn from_provider_event(event: &Value) -> Option<Self> {
        let mut summary = EventSummary::from_provider_event(event)?;
        let seatmap_url = string_at(event, "/seatmap/staticUrl");
        if summary.image_url.is_none() {
            summary.image_url = seatmap_url.clone();
        }

        Some(Self {
            summary,
            genres: genre_path(event),
            price_range: price_range_text(event),
            status: string_at(event, "/dates/status/code"),
            artists: artists_line(event),
            ticket_url: string_at(event, "/url"),
            seatmap_url,
        })
    }
}

/// Extract every usable event from a provider search payload.
///
/// The provider omits `_embedded` entirely when nothing matched, so a missing
/// path yields an empty list rather than an error.
pub fn events_from_search_payload(payload: &Value) -> Vec<EventSummary> {
    payload
        .pointer("/_embedded/events")
        .and_then(Value::as_array)
        .map(|events| {
            events
                .iter()
                .filter_map(EventSummary::from_provider_event)
                .collect()
        })
        .unwrap_or_default()
}

fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn non_empty(parts: Vec<&str>, separator: &str) -> Option<String> {
    let joined = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator);
    (!joined.is_empty()).then_some(joined)
}

fn genre_path(event: &Value) -> Option<String> {
    let first = event.pointer("/classifications/0")?;
    let parts = ["/segment/name", "/genre/name", "/subGenre/name"]
        .into_iter()
        .filter_map(|pointer| first.pointer(pointer).and_then(Value::as_str))
        .collect();
    non_empty(parts, ", ")
}

fn artists_line(event: &Value) -> Option<String> {
    let names = event
        .pointer("/_embedded/attractions")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(|a| a.get("name").and_then(Value::as_str))
        .collect();
    non_empty(names, ", ")
}

fn price_range_text(event: &Value) -> Option<String> {
    let range = event.pointer("/priceRanges/0")?;
    let min = range.get("min").and_then(Value::as_f64)?;
    let currency = range.get("currency").and_then(Value::as_str).unwrap_or_default();

    let amount = match range.get("max").and_then(Value::as_f64) {
        Some(max) => format!("{min:.2}\u{2013}{max:.2}"),
        None => format!("{min:.2}"),
    };
    Some(format!("{amount} {currency}").trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider_event() -> Value {
        json!({
            "id": "vvG1iZ9pNkFa2M",
            "name": "Phoebe Bridgers",
            "dates": { "start": { "localDate": "2026-11-02", "localTime": "19:30:00" } },
            "_embedded": { "venues": [{ "name": "Hollywood Bowl" }] },
            "classifications": [{ "segment": { "name": "Music" } }],
            "images": [{ "url": "https://img.example/1.jpg" }, { "url": "https://img.example/2.jpg" }]
        })
    }

    #[test]
    fn maps_all_fields_from_provider_event() {
        let summary = EventSummary::from_provider_event(&provider_event()).unwrap();

        assert_eq!(summary.id, "vvG1iZ9pNkFa2M");
        assert_eq!(summary.name, "Phoebe Bridgers");
        assert_eq!(summary.date.as_deref(), Some("2026-11-02"));
        assert_eq!(summary.time.as_deref(), Some("19:30:00"));
        assert_eq!(summary.venue.as_deref(), Some("Hollywood Bowl"));
        assert_eq!(summary.genre.as_deref(), Some("Music"));
        assert_eq!(summary.image_url.as_deref(), Some("https://img.example/1.jpg"));
    }

    #[test]
    fn missing_classification_uses_default_genre() {
        let event = json!({ "id": "e1", "name": "Open Mic" });
        let summary = EventSummary::from_provider_event(&event).unwrap();

        assert_eq!(summary.genre.as_deref(), Some(DEFAULT_GENRE));
        assert!(summary.date.is_none());
        assert!(summary.venue.is_none());
        assert!(summary.image_url.is_none());
    }

    #[test]
    fn event_without_id_is_skipped() {
        assert!(EventSummary::from_provider_event(&json!({ "name": "No id" })).is_none());
    }

    #[test]
    fn search_payload_without_embedded_is_empty() {
        assert!(events_from_search_payload(&json!({ "page": { "totalElements": 0 } })).is_empty());
    }

    #[test]
    fn search_payload_keeps_provider_order() {
        let payload = json!({
            "_embedded": { "events": [
                { "id": "a", "name": "First" },
                { "name": "broken" },
                { "id": "b", "name": "Second" }
            ]}
        });

        let ids: Vec<_> = events_from_search_payload(&payload)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn deserializes_favorite_record_shape() {
        let record = json!({
            "eventId": "e9",
            "name": "Jazz Night",
            "venue": "Blue Note",
            "addedAt": "2026-10-01T12:00:00Z"
        });

        let summary: EventSummary = serde_json::from_value(record).unwrap();
        assert_eq!(summary.id, "e9");
        assert_eq!(summary.venue.as_deref(), Some("Blue Note"));
    }

    fn detail_record() -> Value {
        json!({
            "id": "G5v",
            "name": "Jazz Night",
            "url": "https://tickets.example/G5v",
            "dates": {
                "start": { "localDate": "2026-12-01", "localTime": "20:00:00" },
                "status": { "code": "onsale" }
            },
            "priceRanges": [{ "min": 35, "max": 89.5, "currency": "USD" }],
            "seatmap": { "staticUrl": "https://maps.example/G5v.png" },
            "classifications": [{
                "segment": { "name": "Music" },
                "genre": { "name": "Jazz" },
                "subGenre": { "name": "Bebop" }
            }],
            "_embedded": {
                "venues": [{ "name": "Blue Note" }],
                "attractions": [{ "name": "Kamasi Washington" }, { "id": "x" }, { "name": "Thundercat" }]
            }
        })
    }

    #[test]
    fn detail_projection_reads_display_fields() {
        let details = EventDetails::from_provider_event(&detail_record()).unwrap();

        assert_eq!(details.genres.as_deref(), Some("Music, Jazz, Bebop"));
        assert_eq!(details.price_range.as_deref(), Some("35.00\u{2013}89.50 USD"));
        assert_eq!(details.status.as_deref(), Some("onsale"));
        assert_eq!(details.artists.as_deref(), Some("Kamasi Washington, Thundercat"));
        assert_eq!(details.ticket_url.as_deref(), Some("https://tickets.example/G5v"));
        assert_eq!(details.summary.venue.as_deref(), Some("Blue Note"));
    }

    #[test]
    fn detail_image_falls_back_to_seatmap() {
        let details = EventDetails::from_provider_event(&detail_record()).unwrap();
        assert_eq!(details.summary.image_url.as_deref(), Some("https://maps.example/G5v.png"));

        let mut record = detail_record();
        record["images"] = json!([{ "url": "https://img.example/hero.jpg" }]);
        let details = EventDetails::from_provider_event(&record).unwrap();
        assert_eq!(details.summary.image_url.as_deref(), Some("https://img.example/hero.jpg"));
        assert_eq!(details.seatmap_url.as_deref(), Some("https://maps.example/G5v.png"));
    }

    #[test]
    fn search_mapping_does_not_use_seatmap() {
        let summary = EventSummary::from_provider_event(&detail_record()).unwrap();
        assert!(summary.image_url.is_none());
    }

    #[test]
    fn price_range_variants() {
        let price = |range: Value| {
            EventDetails::from_provider_event(&json!({ "id": "e", "name": "n", "priceRanges": [range] }))
                .unwrap()
                .price_range
        };

        assert_eq!(price(json!({ "min": 20, "currency": "EUR" })).as_deref(), Some("20.00 EUR"));
        assert_eq!(price(json!({ "min": 20, "max": 40 })).as_deref(), Some("20.00\u{2013}40.00"));
        assert_eq!(price(json!({ "max": 40, "currency": "USD" })), None);
    }

    #[test]
    fn sparse_record_leaves_details_empty() {
        let details = EventDetails::from_provider_event(&json!({
            "id": "e1",
            "name": "Open Mic",
            "classifications": [{ "segment": { "name": "" }, "genre": { "name": "Comedy" } }],
            "_embedded": { "attractions": [] }
        }))
        .unwrap();

        assert_eq!(details.genres.as_deref(), Some("Comedy"));
        assert!(details.price_range.is_none());
        assert!(details.status.is_none());
        assert!(details.artists.is_none());
        assert!(details.summary.image_url.is_none());
        assert!(EventDetails::from_provider_event(&json!({ "id": "e2" })).is_none());
    }
}
