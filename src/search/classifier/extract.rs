//! Per-category extractors over the lower-cased query text.
//!
//! Each extractor walks its pattern table in declared order. Scalar
//! categories (budget, distance, lease) stop at the first match that yields a
//! value; set categories (bedrooms, bathrooms, amenities) take the
//! deduplicated union across every matching pattern.

use super::domain::{
    HousingType, Intent, LocationSignal, DEFAULT_DISTANCE_MILES, NEAR_CAMPUS_CAP_MILES,
};
use super::patterns::{
    AMENITY_PATTERNS, BATHROOM_PATTERNS, BEDROOM_PATTERNS, BUDGET_PATTERNS, DISPLAY_INTENT,
    DISTANCE_PATTERNS, HOUSING_TYPE_GROUPS, LEASE_PATTERNS, LOCATION_KEYWORD_PATTERNS,
    NEAR_CAMPUS, NUMBER, RECOMMEND_INTENT, SEARCH_INTENT,
};

fn first_number(text: &str) -> Option<u32> {
    NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
}

/// First numeric budget mentioned, scanning the budget table in order. A
/// pattern that matches without a numeric capture (the qualitative words)
/// yields nothing and scanning continues with later patterns.
pub(crate) fn extract_budget(text: &str) -> Option<u32> {
    for pattern in BUDGET_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            if let Some(amount) = first_number(found.as_str()) {
                return Some(amount);
            }
        }
    }
    None
}

/// Deduplicated union of bedroom counts across all bedroom patterns, with
/// lexical tokens mapped to integers.
pub(crate) fn extract_bedrooms(text: &str) -> Vec<u32> {
    let mut bedrooms = Vec::new();
    for pattern in BEDROOM_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            let matched = found.as_str();
            let count = if matched.contains("studio") || matched.contains("single") {
                Some(1)
            } else if matched.contains("two") || matched.contains("double") {
                Some(2)
            } else if matched.contains("three") {
                Some(3)
            } else if matched.contains("four") {
                Some(4)
            } else {
                first_number(matched)
            };

            if let Some(count) = count {
                if !bedrooms.contains(&count) {
                    bedrooms.push(count);
                }
            }
        }
    }
    bedrooms
}

/// Deduplicated union of bathroom counts; "half bath" contributes 0.5.
pub(crate) fn extract_bathrooms(text: &str) -> Vec<f32> {
    let mut bathrooms = Vec::new();
    for pattern in BATHROOM_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            let matched = found.as_str();
            let count = if matched.contains("half") {
                Some(0.5)
            } else {
                first_number(matched).map(|n| n as f32)
            };

            if let Some(count) = count {
                if !bathrooms.contains(&count) {
                    bathrooms.push(count);
                }
            }
        }
    }
    bathrooms
}

/// Labels of every amenity pattern present anywhere in the text.
pub(crate) fn extract_amenities(text: &str) -> Vec<String> {
    let mut amenities = Vec::new();
    for (pattern, label) in AMENITY_PATTERNS.iter() {
        if pattern.is_match(text) && !amenities.iter().any(|existing| existing == label) {
            amenities.push((*label).to_string());
        }
    }
    amenities
}

fn location_keywords(text: &str) -> Vec<String> {
    LOCATION_KEYWORD_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(text))
        .map(|(_, label)| (*label).to_string())
        .collect()
}

/// Distance signal, present only when the text actually mentioned a distance
/// number or a near-campus phrase. Near-campus phrasing caps the distance at
/// two miles regardless of any extracted number.
pub(crate) fn extract_location(text: &str) -> Option<LocationSignal> {
    let mut extracted = None;
    'patterns: for pattern in DISTANCE_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            if let Some(distance) = first_number(found.as_str()) {
                extracted = Some(distance as f32);
                break 'patterns;
            }
        }
    }

    let near_campus = NEAR_CAMPUS.is_match(text);
    if extracted.is_none() && !near_campus {
        return None;
    }

    let mut distance = extracted.unwrap_or(DEFAULT_DISTANCE_MILES);
    if near_campus {
        distance = distance.min(NEAR_CAMPUS_CAP_MILES);
    }

    Some(LocationSignal {
        distance,
        near_campus,
        keywords: location_keywords(text),
    })
}

/// Lease length in months; lexical terms map to fixed durations.
pub(crate) fn extract_lease_length(text: &str) -> Option<u32> {
    for pattern in LEASE_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            let matched = found.as_str();
            if matched.contains("year") {
                return Some(12);
            }
            if matched.contains("short") {
                return Some(6);
            }
            if matched.contains("long") {
                return Some(18);
            }
            if let Some(months) = first_number(matched) {
                return Some(months);
            }
        }
    }
    None
}

/// First housing-type group with any keyword present as a substring.
pub(crate) fn classify_housing_type(text: &str) -> HousingType {
    for (housing_type, keywords) in HOUSING_TYPE_GROUPS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return *housing_type;
        }
    }
    HousingType::Apartment
}

/// Verb-priority intent check: search verbs win over display verbs, which win
/// over recommendation verbs.
pub(crate) fn classify_intent(text: &str) -> Intent {
    if SEARCH_INTENT.is_match(text) {
        Intent::Search
    } else if DISPLAY_INTENT.is_match(text) {
        Intent::Display
    } else if RECOMMEND_INTENT.is_match(text) {
        Intent::Recommendation
    } else {
        Intent::Search
    }
}
