//! Two-tier relevance ranking.
//!
//! Listings whose bedroom count matches the query's stated requirement are
//! surfaced before everything else, whatever their other attributes scored.
//! Bedroom count acts as a hard filter expressed softly through ordering, so
//! an over-constrained query still returns a non-empty result set.

use serde::Serialize;

use super::classifier::ClassificationResult;
use super::enhance::EnhancedListing;

/// A response never carries more than this many results.
pub const MAX_RESULTS: usize = 12;

/// Final per-result annotation: the enhanced listing, its relevance score,
/// and whether it sat in the exact-bedroom-match tier.
#[derive(Debug, Clone, Serialize)]
pub struct RankedListing {
    #[serde(flatten)]
    pub enhanced: EnhancedListing,
    pub relevance_score: f32,
    pub exact_bedroom_match: bool,
}

/// Order candidates by (exact bedroom match, overall score), both descending,
/// then truncate. The sort is stable, so ties keep their store order.
pub fn rank(
    enhanced: Vec<EnhancedListing>,
    classification: &ClassificationResult,
) -> Vec<RankedListing> {
    let required = classification.required_bedrooms();

    let mut ranked: Vec<RankedListing> = enhanced
        .into_iter()
        .map(|enhanced| {
            let exact_bedroom_match =
                !required.is_empty() && required.contains(&enhanced.listing.bedrooms);
            let relevance_score = enhanced.relevance_indicators.overall_score;
            RankedListing {
                enhanced,
                relevance_score,
                exact_bedroom_match,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.exact_bedroom_match
            .cmp(&a.exact_bedroom_match)
            .then(b.relevance_score.total_cmp(&a.relevance_score))
    });
    ranked.truncate(MAX_RESULTS);
    ranked
}
