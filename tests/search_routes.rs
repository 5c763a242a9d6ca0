//! HTTP-level tests for the search routes.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use proximate::search::{search_router, MemoryListingStore, SearchService};

fn demo_router() -> Router {
    let store = Arc::new(MemoryListingStore::with_demo_listings());
    search_router(Arc::new(SearchService::new(store)))
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn intelligent_route_returns_classification_and_results() {
    let response = demo_router()
        .oneshot(json_request(
            "/api/v1/search/intelligent",
            json!({ "query": "2 bedroom with parking under $1400" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    assert_eq!(
        payload.get("query").and_then(Value::as_str),
        Some("2 bedroom with parking under $1400")
    );

    let classification = payload.get("classification").expect("classification block");
    assert_eq!(
        classification.get("intent").and_then(Value::as_str),
        Some("search")
    );
    assert!(classification
        .get("confidence")
        .and_then(Value::as_f64)
        .is_some_and(|c| c > 0.0));

    let results = payload
        .get("results")
        .and_then(Value::as_array)
        .expect("results array");
    assert!(!results.is_empty());
    assert_eq!(
        payload.get("total_results").and_then(Value::as_u64),
        Some(results.len() as u64)
    );

    // the two-bedroom matches sit ahead of everything else
    assert!(results[0]
        .get("exact_bedroom_match")
        .and_then(Value::as_bool)
        .unwrap_or(false));
}

#[tokio::test]
async fn intelligent_route_rejects_blank_query() {
    let response = demo_router()
        .oneshot(json_request(
            "/api/v1/search/intelligent",
            json!({ "query": "   " }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload.get("error").is_some());
}

#[tokio::test]
async fn voice_route_defaults_recognition_confidence() {
    let response = demo_router()
        .oneshot(json_request(
            "/api/v1/search/voice",
            json!({ "transcript": "studio near campus" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    let voice_confidence = payload
        .get("voice_confidence")
        .and_then(Value::as_f64)
        .expect("voice confidence present");
    assert!((voice_confidence - 0.8).abs() < 1e-6);
    assert_eq!(
        payload.get("transcript").and_then(Value::as_str),
        Some("studio near campus")
    );

    // voice confidence discounts the classification confidence
    let confidence = payload
        .get("classification")
        .and_then(|c| c.get("confidence"))
        .and_then(Value::as_f64)
        .expect("confidence present");
    assert!(confidence < 0.9);
}

#[tokio::test]
async fn voice_route_rejects_out_of_range_confidence() {
    let response = demo_router()
        .oneshot(json_request(
            "/api/v1/search/voice",
            json!({ "transcript": "studio near campus", "confidence": 1.5 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn suggestions_route_filters_by_partial_query() {
    let response = demo_router()
        .oneshot(
            Request::get("/api/v1/search/suggestions?q=bedroom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    assert_eq!(payload.get("query").and_then(Value::as_str), Some("bedroom"));
    let suggestions = payload
        .get("suggestions")
        .and_then(Value::as_array)
        .expect("suggestions array");
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 5);
    assert!(suggestions
        .iter()
        .all(|s| s.as_str().unwrap().to_lowercase().contains("bedroom")));
}

#[tokio::test]
async fn suggestions_route_returns_empty_for_short_input() {
    let response = demo_router()
        .oneshot(
            Request::get("/api/v1/search/suggestions?q=a")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .get("suggestions")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(0)
    );
}
