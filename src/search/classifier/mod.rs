//! Natural-language housing-query classifier.
//!
//! Converts free-text (or voice-transcribed) search input into a structured
//! preference record plus the list of entities that produced it. Pure and
//! synchronous; malformed input degrades to the default record with
//! confidence 0 rather than failing.

pub mod domain;
mod extract;
mod patterns;

pub use domain::{
    Campus, ClassificationResult, EntityKind, EntityValue, ExtractedEntity, HousingType, Intent,
    LocationSignal, Preferences, PriceRange, SearchFilters, DEFAULT_DISTANCE_MILES,
    DEFAULT_LEASE_MONTHS, DEFAULT_MAX_PRICE, NEAR_CAMPUS_CAP_MILES,
};

const BUDGET_CONFIDENCE: f32 = 0.9;
const BEDROOM_CONFIDENCE: f32 = 0.9;
const BATHROOM_CONFIDENCE: f32 = 0.9;
const AMENITY_CONFIDENCE: f32 = 0.8;
const LOCATION_CONFIDENCE: f32 = 0.8;
const LEASE_CONFIDENCE: f32 = 0.8;

/// Classify one query. Entities are extracted per category in a fixed order
/// (budget, bedrooms, bathrooms, amenities, location, lease) and folded into
/// the preference record as they are found.
pub fn classify(input: &str) -> ClassificationResult {
    if input.trim().is_empty() {
        return fallback(input);
    }

    let text = input.to_lowercase();
    let mut preferences = Preferences::default_record();
    let mut entities = Vec::new();

    if let Some(budget) = extract::extract_budget(&text) {
        preferences.price_range.max = budget;
        entities.push(ExtractedEntity {
            kind: EntityKind::Budget,
            value: EntityValue::Budget(budget),
            confidence: BUDGET_CONFIDENCE,
        });
    }

    let bedrooms = extract::extract_bedrooms(&text);
    if !bedrooms.is_empty() {
        preferences.bedrooms = bedrooms.clone();
        entities.push(ExtractedEntity {
            kind: EntityKind::Bedrooms,
            value: EntityValue::Bedrooms(bedrooms),
            confidence: BEDROOM_CONFIDENCE,
        });
    }

    let bathrooms = extract::extract_bathrooms(&text);
    if !bathrooms.is_empty() {
        preferences.bathrooms = bathrooms.clone();
        entities.push(ExtractedEntity {
            kind: EntityKind::Bathrooms,
            value: EntityValue::Bathrooms(bathrooms),
            confidence: BATHROOM_CONFIDENCE,
        });
    }

    let amenities = extract::extract_amenities(&text);
    if !amenities.is_empty() {
        preferences.amenities = amenities.clone();
        entities.push(ExtractedEntity {
            kind: EntityKind::Amenities,
            value: EntityValue::Amenities(amenities),
            confidence: AMENITY_CONFIDENCE,
        });
    }

    if let Some(signal) = extract::extract_location(&text) {
        preferences.distance_to_campus = signal.distance;
        entities.push(ExtractedEntity {
            kind: EntityKind::Location,
            value: EntityValue::Location(signal),
            confidence: LOCATION_CONFIDENCE,
        });
    }

    if let Some(months) = extract::extract_lease_length(&text) {
        preferences.lease_length = Some(months);
        entities.push(ExtractedEntity {
            kind: EntityKind::Lease,
            value: EntityValue::Lease(months),
            confidence: LEASE_CONFIDENCE,
        });
    }

    let confidence = mean_confidence(&entities);

    ClassificationResult {
        original_input: input.to_string(),
        intent: extract::classify_intent(&text),
        housing_type: extract::classify_housing_type(&text),
        preferences,
        extracted_entities: entities,
        confidence,
    }
}

fn fallback(input: &str) -> ClassificationResult {
    ClassificationResult {
        original_input: input.to_string(),
        intent: Intent::Search,
        housing_type: HousingType::Apartment,
        preferences: Preferences::default_record(),
        extracted_entities: Vec::new(),
        confidence: 0.0,
    }
}

/// Arithmetic mean of entity confidences, clamped at 1.0. A monotone "how
/// much was extracted" signal, not a calibrated probability.
fn mean_confidence(entities: &[ExtractedEntity]) -> f32 {
    if entities.is_empty() {
        return 0.0;
    }
    let total: f32 = entities.iter().map(|entity| entity.confidence).sum();
    (total / entities.len() as f32).min(1.0)
}
