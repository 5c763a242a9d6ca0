//! Search orchestrator: classification, store query, enhancement, ranking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classifier::{classify, ClassificationResult, ExtractedEntity, HousingType, Intent, SearchFilters};
use super::enhance::enhance;
use super::query::ListingQuery;
use super::rank::{rank, RankedListing};
use super::store::{ListingStore, StoreError};
use super::suggest;

/// Candidate pool fetched from the store for text searches.
pub const TEXT_CANDIDATE_LIMIT: usize = 50;
/// Voice transcripts are noisier; keep the candidate pool tighter.
pub const VOICE_CANDIDATE_LIMIT: usize = 15;

/// Service composing the classifier, the query translator, and the ranking
/// pipeline over a listing store.
pub struct SearchService<S> {
    store: Arc<S>,
}

impl<S> SearchService<S>
where
    S: ListingStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Run the full pipeline for a free-text query.
    pub fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        self.run(query, TEXT_CANDIDATE_LIMIT, None)
    }

    /// Run the pipeline for a voice transcript. The recognizer's confidence
    /// multiplicatively discounts the classifier's own confidence.
    pub fn voice_search(
        &self,
        transcript: &str,
        recognition_confidence: f32,
    ) -> Result<SearchOutcome, SearchError> {
        self.run(transcript, VOICE_CANDIDATE_LIMIT, Some(recognition_confidence))
    }

    /// Canned suggestions for a partial query.
    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        suggest::suggestions(partial)
    }

    fn run(
        &self,
        input: &str,
        candidate_limit: usize,
        recognition_confidence: Option<f32>,
    ) -> Result<SearchOutcome, SearchError> {
        let mut classification = classify(input);
        if let Some(recognition) = recognition_confidence {
            classification.confidence = (classification.confidence * recognition).min(1.0);
        }

        let search_filters = classification.preferences.filters();
        let query = ListingQuery::from_preferences(&classification.preferences);

        let candidates = self.store.find(&query, candidate_limit)?;
        tracing::debug!(
            candidates = candidates.len(),
            confidence = classification.confidence,
            intent = classification.intent.label(),
            "classified search query"
        );

        let results = rank(enhance(candidates, &classification), &classification);

        Ok(SearchOutcome {
            query: input.to_string(),
            classification,
            search_filters,
            results,
            timestamp: Utc::now(),
        })
    }
}

/// Everything one search produced. Created per request and dropped with the
/// response.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: String,
    pub classification: ClassificationResult,
    pub search_filters: SearchFilters,
    pub results: Vec<RankedListing>,
    pub timestamp: DateTime<Utc>,
}

impl SearchOutcome {
    pub fn total_results(&self) -> usize {
        self.results.len()
    }

    /// Trimmed classification view exposed in API responses.
    pub fn classification_summary(&self) -> ClassificationSummary {
        ClassificationSummary {
            intent: self.classification.intent,
            housing_type: self.classification.housing_type,
            confidence: self.classification.confidence,
            extracted_entities: self.classification.extracted_entities.clone(),
        }
    }
}

/// Classification subset serialized in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationSummary {
    pub intent: Intent,
    pub housing_type: HousingType,
    pub confidence: f32,
    pub extracted_entities: Vec<ExtractedEntity>,
}

/// Error raised by the search pipeline. The only failure source is the
/// listing store; classification itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::ListingQuery;
    use crate::search::store::{Listing, MemoryListingStore};

    struct UnavailableStore;

    impl ListingStore for UnavailableStore {
        fn find(&self, _query: &ListingQuery, _limit: usize) -> Result<Vec<Listing>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn demo_service() -> SearchService<MemoryListingStore> {
        SearchService::new(Arc::new(MemoryListingStore::with_demo_listings()))
    }

    #[test]
    fn search_returns_classification_and_results() {
        let outcome = demo_service()
            .search("2 bedroom apartment with parking under $1400")
            .expect("store responds");

        assert_eq!(outcome.classification.preferences.bedrooms, vec![2]);
        assert!(outcome.total_results() > 0);
        assert!(outcome
            .results
            .iter()
            .all(|result| result.enhanced.listing.bedrooms == 2));
        assert!(outcome.search_filters.parking);
    }

    #[test]
    fn voice_confidence_discounts_multiplicatively() {
        let service = demo_service();

        let text = service.search("2 bedroom under $1200").expect("store responds");
        let voice = service
            .voice_search("2 bedroom under $1200", 0.5)
            .expect("store responds");

        assert!(
            (voice.classification.confidence - text.classification.confidence * 0.5).abs() < 1e-6
        );
    }

    #[test]
    fn voice_confidence_clamps_at_one() {
        // recognition confidence is validated at the transport layer; even an
        // out-of-range value cannot push the product past 1.0
        let outcome = demo_service()
            .voice_search("2 bedroom under $1200", 1.5)
            .expect("store responds");
        assert!(outcome.classification.confidence <= 1.0);
    }

    #[test]
    fn store_failure_propagates() {
        let service = SearchService::new(Arc::new(UnavailableStore));
        let error = service.search("anything").expect_err("store is down");
        assert!(matches!(error, SearchError::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn empty_query_degrades_instead_of_failing() {
        let outcome = demo_service().search("").expect("store responds");
        assert_eq!(outcome.classification.confidence, 0.0);
        assert!(outcome.classification.extracted_entities.is_empty());
        // default record ceilings still apply: $2000 and 5 miles exclude only
        // the luxury condo from the demo inventory
        assert_eq!(outcome.total_results(), 7);
    }
}
