//! Typed client for the gigscout HTTP API.
//!
//! Event and artist payloads come back as raw [`serde_json::Value`], exactly
//! as the API passes them through from the providers.

use async_trait::async_trait;
use gigscout_core::event::{EventDetails, EventSummary};
use serde_json::Value;

use crate::favorites::FavoritesRemote;
use crate::http::{endpoint, split_failure};

/// Errors from the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The configured API root cannot be extended with a request path.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Query for `GET /events/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub keyword: String,
    pub radius: String,
    pub lat: f64,
    pub lng: f64,
    pub segment_id: Option<&'static str>,
}

/// HTTP client for one gigscout API deployment.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - API root including the `/api` prefix.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Raw search payload for the given origin and filters.
    pub async fn search_events(&self, request: &SearchRequest) -> Result<Value, ClientError> {
        let lat = request.lat.to_string();
        let lng = request.lng.to_string();

        let mut query: Vec<(&str, &str)> = vec![
            ("keyword", request.keyword.as_str()),
            ("radius", request.radius.as_str()),
            ("lat", lat.as_str()),
            ("lng", lng.as_str()),
        ];
        if let Some(segment_id) = request.segment_id {
            query.push(("segmentId", segment_id));
        }

        self.get_json(&["events", "search"], &query).await
    }

    /// Raw keyword-suggestion payload.
    pub async fn suggest(&self, keyword: &str) -> Result<Value, ClientError> {
        self.get_json(&["events", "suggest"], &[("keyword", keyword)]).await
    }

    /// Full provider record for one event.
    pub async fn event_detail(&self, event_id: &str) -> Result<Value, ClientError> {
        self.get_json(&["events", event_id], &[]).await
    }

    /// Display projection of one event; `None` when the record lacks an id
    /// or name.
    pub async fn event_details(&self, event_id: &str) -> Result<Option<EventDetails>, ClientError> {
        let record = self.event_detail(event_id).await?;
        Ok(EventDetails::from_provider_event(&record))
    }

    /// Best-matching artist for `name`, `None` when nothing matched.
    pub async fn lookup_artist(&self, name: &str) -> Result<Option<Value>, ClientError> {
        let payload = self.get_json(&["spotify", "lookup"], &[("name", name)]).await?;
        Ok(payload.get("artist").filter(|a| !a.is_null()).cloned())
    }

    pub async fn artist(&self, artist_id: &str) -> Result<Value, ClientError> {
        self.get_json(&["spotify", "artist", artist_id], &[]).await
    }

    /// The artist's albums and singles (the `items` array of the payload).
    pub async fn artist_albums(&self, artist_id: &str) -> Result<Vec<Value>, ClientError> {
        let payload = self
            .get_json(&["spotify", "artist", artist_id, "albums"], &[])
            .await?;
        Ok(payload
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Every saved favorite, newest first.
    pub async fn list_favorites(&self) -> Result<Vec<EventSummary>, ClientError> {
        let response = self
            .client
            .get(self.url(&["favorites"])?)
            .send()
            .await?;

        Ok(Self::ensure_success(response).await?.json().await?)
    }

    /// Create or replace the favorite for `event.id`.
    pub async fn save_favorite(&self, event: &EventSummary) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url(&["favorites"])?)
            .json(event)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Remove a favorite. Removing an unknown id succeeds.
    pub async fn delete_favorite(&self, event_id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&["favorites", event_id])?)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, ClientError> {
        endpoint(&self.base_url, segments).map_err(ClientError::InvalidUrl)
    }

    async fn get_json(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Value, ClientError> {
        let response = self.client.get(self.url(segments)?).query(query).send().await?;
        Ok(Self::ensure_success(response).await?.json().await?)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        split_failure(response)
            .await
            .map_err(|(status, body)| ClientError::Api { status, body })
    }
}

#[async_trait]
impl FavoritesRemote for ApiClient {
    async fn list(&self) -> Result<Vec<EventSummary>, ClientError> {
        self.list_favorites().await
    }

    async fn save(&self, event: &EventSummary) -> Result<(), ClientError> {
        self.save_favorite(event).await
    }

    async fn delete(&self, event_id: &str) -> Result<(), ClientError> {
        self.delete_favorite(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(reqwest::Client::new(), format!("{}/api/", server.url()))
    }

    #[tokio::test]
    async fn list_reads_stored_records() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/favorites")
            .with_status(200)
            .with_body(
                json!([{
                    "eventId": "e1",
                    "name": "Show",
                    "venue": "Hall",
                    "addedAt": "2026-10-01T12:00:00Z"
                }])
                .to_string(),
            )
            .create_async()
            .await;

        let favorites = client(&server).list_favorites().await.unwrap();

        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "e1");
        assert_eq!(favorites[0].venue.as_deref(), Some("Hall"));
    }

    #[tokio::test]
    async fn save_posts_event_summary() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/favorites")
            .match_body(Matcher::PartialJson(json!({ "id": "e1", "name": "Show" })))
            .with_status(201)
            .with_body(r#"{"eventId":"e1","name":"Show"}"#)
            .expect(1)
            .create_async()
            .await;

        let event = EventSummary {
            id: "e1".into(),
            name: "Show".into(),
            date: None,
            time: None,
            venue: None,
            genre: None,
            image_url: None,
        };
        client(&server).save_favorite(&event).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failure_status_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/api/favorites/e1")
            .with_status(500)
            .with_body(r#"{"error":"Database is not connected"}"#)
            .create_async()
            .await;

        let err = client(&server).delete_favorite("e1").await.unwrap_err();

        assert_matches!(err, ClientError::Api { status: 500, .. });
    }

    #[tokio::test]
    async fn ids_are_sent_as_single_path_segments() {
        let mut server = Server::new_async().await;
        let delete = server
            .mock("DELETE", "/api/favorites/a%3Fb")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;
        let detail = server
            .mock("GET", "/api/events/x%2F..%2Fy")
            .with_status(200)
            .with_body(r#"{"id":"x/../y"}"#)
            .expect(1)
            .create_async()
            .await;
        let albums = server
            .mock("GET", "/api/spotify/artist/a%23b/albums")
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .expect(1)
            .create_async()
            .await;
        let client = client(&server);

        client.delete_favorite("a?b").await.unwrap();
        assert_eq!(client.event_detail("x/../y").await.unwrap()["id"], "x/../y");
        assert!(client.artist_albums("a#b").await.unwrap().is_empty());

        delete.assert_async().await;
        detail.assert_async().await;
        albums.assert_async().await;
    }

    #[tokio::test]
    async fn event_details_projects_record_with_seatmap_image() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/events/G5v")
            .with_status(200)
            .with_body(
                json!({
                    "id": "G5v",
                    "name": "Jazz Night",
                    "dates": { "status": { "code": "onsale" } },
                    "seatmap": { "staticUrl": "https://maps.example/G5v.png" },
                    "_embedded": { "attractions": [{ "name": "Thundercat" }] }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let details = client(&server).event_details("G5v").await.unwrap().unwrap();

        assert_eq!(details.summary.image_url.as_deref(), Some("https://maps.example/G5v.png"));
        assert_eq!(details.status.as_deref(), Some("onsale"));
        assert_eq!(details.artists.as_deref(), Some("Thundercat"));
    }

    #[tokio::test]
    async fn lookup_maps_null_artist_to_none() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/spotify/lookup")
            .match_query(Matcher::UrlEncoded("name".into(), "nobody".into()))
            .with_status(200)
            .with_body(r#"{"artist":null}"#)
            .create_async()
            .await;

        assert!(client(&server).lookup_artist("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn albums_unwraps_items() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/spotify/artist/a1/albums")
            .with_status(200)
            .with_body(r#"{"items":[{"id":"al1"},{"id":"al2"}],"total":2}"#)
            .create_async()
            .await;

        let albums = client(&server).artist_albums("a1").await.unwrap();

        assert_eq!(albums.len(), 2);
        assert_eq!(albums[1]["id"], "al2");
    }
}
