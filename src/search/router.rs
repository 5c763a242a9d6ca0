use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::rank::RankedListing;
use super::service::{ClassificationSummary, SearchOutcome, SearchService};
use super::store::ListingStore;
use crate::search::classifier::SearchFilters;

/// Router builder exposing the intelligent, voice, and suggestion endpoints.
pub fn search_router<S>(service: Arc<SearchService<S>>) -> Router
where
    S: ListingStore + 'static,
{
    Router::new()
        .route("/api/v1/search/intelligent", post(intelligent_handler::<S>))
        .route("/api/v1/search/voice", post(voice_handler::<S>))
        .route("/api/v1/search/suggestions", get(suggestions_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntelligentSearchRequest {
    pub(crate) query: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub(crate) user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VoiceSearchRequest {
    pub(crate) transcript: String,
    #[serde(default = "default_recognition_confidence")]
    pub(crate) confidence: f32,
}

fn default_recognition_confidence() -> f32 {
    0.8
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestionParams {
    #[serde(default)]
    pub(crate) q: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    pub(crate) query: String,
    pub(crate) classification: ClassificationSummary,
    pub(crate) search_filters: SearchFilters,
    pub(crate) results: Vec<RankedListing>,
    pub(crate) total_results: usize,
    pub(crate) timestamp: DateTime<Utc>,
}

impl SearchResponse {
    fn from_outcome(outcome: SearchOutcome) -> Self {
        let classification = outcome.classification_summary();
        Self {
            query: outcome.query,
            classification,
            search_filters: outcome.search_filters,
            total_results: outcome.results.len(),
            results: outcome.results,
            timestamp: outcome.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct VoiceSearchResponse {
    pub(crate) transcript: String,
    pub(crate) voice_confidence: f32,
    pub(crate) classification: ClassificationSummary,
    pub(crate) search_filters: SearchFilters,
    pub(crate) results: Vec<RankedListing>,
    pub(crate) total_results: usize,
    pub(crate) timestamp: DateTime<Utc>,
}

fn bad_request(message: &str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

pub(crate) async fn intelligent_handler<S>(
    State(service): State<Arc<SearchService<S>>>,
    axum::Json(request): axum::Json<IntelligentSearchRequest>,
) -> Response
where
    S: ListingStore + 'static,
{
    if request.query.trim().is_empty() {
        return bad_request("query is required");
    }

    match service.search(&request.query) {
        Ok(outcome) => {
            let body = SearchResponse::from_outcome(outcome);
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn voice_handler<S>(
    State(service): State<Arc<SearchService<S>>>,
    axum::Json(request): axum::Json<VoiceSearchRequest>,
) -> Response
where
    S: ListingStore + 'static,
{
    if request.transcript.trim().is_empty() {
        return bad_request("voice transcript is required");
    }
    if !(0.0..=1.0).contains(&request.confidence) {
        return bad_request("confidence must lie between 0 and 1");
    }

    match service.voice_search(&request.transcript, request.confidence) {
        Ok(outcome) => {
            let classification = outcome.classification_summary();
            let body = VoiceSearchResponse {
                transcript: request.transcript,
                voice_confidence: request.confidence,
                classification,
                search_filters: outcome.search_filters,
                total_results: outcome.results.len(),
                results: outcome.results,
                timestamp: outcome.timestamp,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn suggestions_handler<S>(
    State(service): State<Arc<SearchService<S>>>,
    Query(params): Query<SuggestionParams>,
) -> Response
where
    S: ListingStore + 'static,
{
    let suggestions = service.suggestions(&params.q);
    let payload = json!({
        "suggestions": suggestions,
        "query": params.q,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::ListingQuery;
    use crate::search::store::{Listing, MemoryListingStore, StoreError};

    struct UnavailableStore;

    impl ListingStore for UnavailableStore {
        fn find(&self, _query: &ListingQuery, _limit: usize) -> Result<Vec<Listing>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn demo_service() -> Arc<SearchService<MemoryListingStore>> {
        Arc::new(SearchService::new(Arc::new(
            MemoryListingStore::with_demo_listings(),
        )))
    }

    #[tokio::test]
    async fn intelligent_handler_rejects_empty_query() {
        let response = intelligent_handler(
            State(demo_service()),
            axum::Json(IntelligentSearchRequest {
                query: "   ".to_string(),
                user_id: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn intelligent_handler_returns_ranked_results() {
        let response = intelligent_handler(
            State(demo_service()),
            axum::Json(IntelligentSearchRequest {
                query: "2 bedroom with parking under $1400".to_string(),
                user_id: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn voice_handler_validates_confidence_range() {
        let response = voice_handler(
            State(demo_service()),
            axum::Json(VoiceSearchRequest {
                transcript: "studio near campus".to_string(),
                confidence: 1.2,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_failures_map_to_internal_error() {
        let service = Arc::new(SearchService::new(Arc::new(UnavailableStore)));
        let response = intelligent_handler(
            State(service),
            axum::Json(IntelligentSearchRequest {
                query: "anything".to_string(),
                user_id: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
