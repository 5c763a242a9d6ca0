//! Per-listing response annotation: relevance indicators, a synthesized
//! highlight description, and demo image padding.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classifier::{ClassificationResult, Preferences};
use super::query::UNCONSTRAINED_DISTANCE_MILES;
use super::store::Listing;

/// Annotated listings never carry more than this many images.
pub const MAX_IMAGES: usize = 8;

/// Stock photos appended for listings with sparse galleries. Cosmetic demo
/// behavior, not an image pipeline.
const STOCK_PHOTO_URLS: [&str; 5] = [
    "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1570129477492-45c003edd2be?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1545324418-cc1a3fa10c00?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1560448204-603b3fc33ddc?w=800&h=600&fit=crop",
];

const HIGHLIGHT_DISTANCE_MILES: f32 = 2.0;

/// Four independent boolean match signals plus their fixed-denominator
/// average. An indicator only evaluates when the corresponding preference
/// signal is present; absence of a signal never counts as a match, and the
/// score denominator stays 4 regardless, so a query that exercised fewer
/// signals cannot reach 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelevanceIndicators {
    pub price_match: bool,
    pub bedroom_match: bool,
    pub amenity_match: bool,
    pub location_match: bool,
    pub overall_score: f32,
}

impl RelevanceIndicators {
    pub(crate) fn evaluate(listing: &Listing, preferences: &Preferences) -> Self {
        let price_match =
            preferences.price_range.max > 0 && listing.price <= preferences.price_range.max;

        let bedroom_match =
            !preferences.bedrooms.is_empty() && preferences.bedrooms.contains(&listing.bedrooms);

        let amenity_match = !preferences.amenities.is_empty()
            && preferences.amenities.iter().any(|wanted| {
                let wanted = wanted.to_lowercase();
                listing
                    .amenities
                    .iter()
                    .any(|offered| offered.to_lowercase().contains(&wanted))
            });

        let location_match = preferences.distance_to_campus < UNCONSTRAINED_DISTANCE_MILES
            && listing.distance_to_campus <= preferences.distance_to_campus;

        let matches = [price_match, bedroom_match, amenity_match, location_match]
            .iter()
            .filter(|matched| **matched)
            .count();

        Self {
            price_match,
            bedroom_match,
            amenity_match,
            location_match,
            overall_score: matches as f32 / 4.0,
        }
    }
}

/// A listing copy annotated for the response. The stored record is untouched;
/// only this copy carries the padded image list and derived fields.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub relevance_indicators: RelevanceIndicators,
    pub smart_description: String,
    pub enhanced_at: DateTime<Utc>,
}

/// Annotate candidates in store order.
pub fn enhance(listings: Vec<Listing>, classification: &ClassificationResult) -> Vec<EnhancedListing> {
    let enhanced_at = Utc::now();
    listings
        .into_iter()
        .map(|mut listing| {
            let relevance_indicators =
                RelevanceIndicators::evaluate(&listing, &classification.preferences);
            let smart_description = smart_description(&listing, &classification.preferences);
            pad_images(&mut listing.images);

            EnhancedListing {
                listing,
                relevance_indicators,
                smart_description,
                enhanced_at,
            }
        })
        .collect()
}

fn has_amenity(listing: &Listing, label: &str) -> bool {
    listing
        .amenities
        .iter()
        .any(|amenity| amenity.eq_ignore_ascii_case(label))
}

/// Canned highlights checked in fixed order; falls back to the listing's own
/// description when none apply.
fn smart_description(listing: &Listing, preferences: &Preferences) -> String {
    let mut highlights = Vec::new();

    if listing.price <= preferences.price_range.max {
        highlights.push(format!("Great price at ${}/month", listing.price));
    }
    if listing.distance_to_campus <= HIGHLIGHT_DISTANCE_MILES {
        highlights.push(format!(
            "Only {} miles from campus",
            listing.distance_to_campus
        ));
    }
    if has_amenity(listing, "Pet Friendly") {
        highlights.push("Pet-friendly".to_string());
    }
    if has_amenity(listing, "Furnished") {
        highlights.push("Furnished".to_string());
    }
    if has_amenity(listing, "Parking") {
        highlights.push("Parking included".to_string());
    }

    if highlights.is_empty() {
        listing.description.clone()
    } else {
        format!("Perfect match! {}.", highlights.join(", "))
    }
}

fn pad_images(images: &mut Vec<String>) {
    images.extend(STOCK_PHOTO_URLS.iter().map(|url| url.to_string()));
    images.truncate(MAX_IMAGES);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::classifier::classify;
    use chrono::Utc;

    fn listing(price: u32, bedrooms: u32, amenities: &[&str], distance: f32) -> Listing {
        Listing {
            id: "test-listing".to_string(),
            title: "Test Listing".to_string(),
            description: "A plain description.".to_string(),
            price,
            bedrooms,
            bathrooms: 1.0,
            amenities: amenities.iter().map(|a| a.to_string()).collect(),
            images: vec!["https://example.com/original.jpg".to_string()],
            distance_to_campus: distance,
            available: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn indicators_require_preference_signals() {
        let classification = classify("zzzz");
        let candidate = listing(700, 2, &["Parking"], 0.5);
        let indicators =
            RelevanceIndicators::evaluate(&candidate, &classification.preferences);

        // price (default max 2000) and distance (default 5.0) signals exist in
        // the default record, bedrooms and amenities do not
        assert!(indicators.price_match);
        assert!(indicators.location_match);
        assert!(!indicators.bedroom_match);
        assert!(!indicators.amenity_match);
        assert_eq!(indicators.overall_score, 0.5);
    }

    #[test]
    fn full_match_scores_one() {
        let classification = classify("2 bedroom with parking near campus under $1300");
        let candidate = listing(1200, 2, &["Parking"], 0.8);
        let indicators =
            RelevanceIndicators::evaluate(&candidate, &classification.preferences);

        assert!(indicators.price_match);
        assert!(indicators.bedroom_match);
        assert!(indicators.amenity_match);
        assert!(indicators.location_match);
        assert_eq!(indicators.overall_score, 1.0);
    }

    #[test]
    fn amenity_indicator_uses_substring_overlap() {
        let classification = classify("needs laundry");
        let candidate = listing(900, 1, &["In-unit Laundry"], 4.0);
        let indicators =
            RelevanceIndicators::evaluate(&candidate, &classification.preferences);
        assert!(indicators.amenity_match);
    }

    #[test]
    fn images_capped_at_eight() {
        let classification = classify("anything");
        let mut candidate = listing(900, 1, &[], 4.0);
        candidate.images = (0..6)
            .map(|i| format!("https://example.com/{i}.jpg"))
            .collect();

        let enhanced = enhance(vec![candidate], &classification);
        assert_eq!(enhanced[0].listing.images.len(), MAX_IMAGES);
        assert_eq!(enhanced[0].listing.images[0], "https://example.com/0.jpg");
    }

    #[test]
    fn smart_description_joins_highlights_in_order() {
        let classification = classify("pet friendly under $1500");
        let candidate = listing(1100, 1, &["Pet Friendly", "Parking"], 1.5);

        let enhanced = enhance(vec![candidate], &classification);
        assert_eq!(
            enhanced[0].smart_description,
            "Perfect match! Great price at $1100/month, Only 1.5 miles from campus, Pet-friendly, Parking included."
        );
    }

    #[test]
    fn smart_description_falls_back_to_listing_text() {
        let classification = classify("under $600");
        let candidate = listing(2000, 1, &[], 6.0);

        let enhanced = enhance(vec![candidate], &classification);
        assert_eq!(enhanced[0].smart_description, "A plain description.");
    }

    #[test]
    fn enhancement_preserves_candidate_order() {
        let classification = classify("apartment");
        let candidates = vec![
            listing(700, 1, &[], 1.0),
            listing(800, 2, &[], 2.0),
            listing(900, 3, &[], 3.0),
        ];
        let prices: Vec<u32> = enhance(candidates, &classification)
            .iter()
            .map(|enhanced| enhanced.listing.price)
            .collect();
        assert_eq!(prices, vec![700, 800, 900]);
    }
}
