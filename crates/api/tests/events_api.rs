//! Integration tests for `/api/events`, with the ticketing provider mocked.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use mockito::{Matcher, Server};
use serde_json::json;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_forwards_parameters_and_passes_payload_through() {
    let mut server = Server::new_async().await;
    let payload = json!({
        "_embedded": { "events": [{ "id": "G5v", "name": "Jazz Night", "extra": [1, 2] }] },
        "page": { "totalElements": 1 }
    });
    let mock = server
        .mock("GET", "/events.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            Matcher::UrlEncoded("keyword".into(), "jazz".into()),
            Matcher::UrlEncoded("radius".into(), "10".into()),
            Matcher::UrlEncoded("unit".into(), "miles".into()),
            Matcher::UrlEncoded("latlong".into(), "34.0211,-118.289".into()),
            Matcher::UrlEncoded("segmentId".into(), "KZFzniwnSyZfZ7v7nJ".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(payload.to_string())
        .expect(1)
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(
        app,
        "/api/events/search?keyword=jazz&radius=10&lat=34.0211&lng=-118.289&segmentId=KZFzniwnSyZfZ7v7nJ",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);
    mock.assert_async().await;
}

#[tokio::test]
async fn search_with_missing_parameter_never_calls_provider() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/events.json")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(app, "/api/events/search?keyword=jazz&radius=10&lat=34.0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required parameters");
    mock.assert_async().await;
}

#[tokio::test]
async fn search_with_non_numeric_coordinates_returns_400() {
    let app = common::build_test_app(common::UNREACHABLE);
    let response = get(app, "/api/events/search?keyword=jazz&radius=10&lat=up&lng=down").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_provider_failure_returns_500() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/events.json")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream down")
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(app, "/api/events/search?keyword=jazz&radius=10&lat=34&lng=-118").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Ticketmaster search failed");
    assert!(!json.to_string().contains("upstream down"));
}

// ---------------------------------------------------------------------------
// Suggest
// ---------------------------------------------------------------------------

#[tokio::test]
async fn suggest_passes_payload_through() {
    let mut server = Server::new_async().await;
    let payload = json!({ "_embedded": { "attractions": [{ "name": "Taylor Swift" }] } });
    server
        .mock("GET", "/suggest")
        .match_query(Matcher::UrlEncoded("keyword".into(), "tay".into()))
        .with_status(200)
        .with_body(payload.to_string())
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(app, "/api/events/suggest?keyword=tay").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);
}

#[tokio::test]
async fn suggest_with_blank_keyword_returns_empty_shape() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/suggest")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(app, "/api/events/suggest?keyword=%20%20").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["_embedded"]["attractions"], json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn suggest_when_rate_limited_returns_empty_shape() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/suggest")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"fault":"rate limit"}"#)
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(app, "/api/events/suggest?keyword=tay").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["_embedded"]["attractions"], json!([]));
}

#[tokio::test]
async fn suggest_when_provider_unreachable_returns_empty_shape() {
    let app = common::build_test_app(common::UNREACHABLE);
    let response = get(app, "/api/events/suggest?keyword=tay").await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn event_detail_passes_payload_through() {
    let mut server = Server::new_async().await;
    let payload = json!({ "id": "G5v", "name": "Jazz Night", "seatmap": { "staticUrl": "x" } });
    server
        .mock("GET", "/events/G5v.json")
        .match_query(Matcher::UrlEncoded("apikey".into(), "test-key".into()))
        .with_status(200)
        .with_body(payload.to_string())
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(app, "/api/events/G5v").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);
}

#[tokio::test]
async fn event_detail_keeps_encoded_id_in_one_segment() {
    let mut server = Server::new_async().await;
    let encoded = server
        .mock("GET", "/events/other%3Fx%3D.json")
        .match_query(Matcher::UrlEncoded("apikey".into(), "test-key".into()))
        .with_status(200)
        .with_body(r#"{"id":"other?x="}"#)
        .expect(1)
        .create_async()
        .await;
    let other = server
        .mock("GET", "/events/other")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(app, "/api/events/other%3Fx%3D").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], "other?x=");
    encoded.assert_async().await;
    other.assert_async().await;
}

#[tokio::test]
async fn event_detail_provider_failure_returns_500() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/events/missing.json")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let app = common::build_test_app(&server.url());
    let response = get(app, "/api/events/missing").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Ticketmaster event details failed");
}
