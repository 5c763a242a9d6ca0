//! Translation of a preference record into the declarative filter expression
//! the listing store consumes.

use serde::Serialize;

use super::classifier::Preferences;
use super::store::Listing;

/// Distances at or above this sentinel mean "no distance constraint".
pub const UNCONSTRAINED_DISTANCE_MILES: f32 = 10.0;

/// Canonical amenity labels implied by the derived preference flags.
const FLAG_IMPLIED_AMENITIES: &[(fn(&Preferences) -> bool, &str)] = &[
    (Preferences::pet_friendly, "Pet Friendly"),
    (Preferences::furnished, "Furnished"),
    (Preferences::parking, "Parking"),
    (Preferences::laundry, "Laundry"),
    (Preferences::wifi, "WiFi"),
];

/// Declarative, AND-combined filter over the listing store. List-valued
/// filters use in-set semantics; `available_only` is always on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingQuery {
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub bedrooms: Vec<u32>,
    pub bathrooms: Vec<f32>,
    pub max_distance: Option<f32>,
    pub amenities: Vec<String>,
    pub available_only: bool,
}

impl ListingQuery {
    /// Build the filter expression. Never fails; an all-default record yields
    /// only the availability constraint.
    pub fn from_preferences(preferences: &Preferences) -> Self {
        let max_price = (preferences.price_range.max > 0).then_some(preferences.price_range.max);
        let min_price = max_price
            .is_some()
            .then(|| preferences.price_range.min)
            .filter(|min| *min > 0);

        let max_distance = (preferences.distance_to_campus < UNCONSTRAINED_DISTANCE_MILES)
            .then_some(preferences.distance_to_campus);

        let mut amenities = preferences.amenities.clone();
        for (flag, label) in FLAG_IMPLIED_AMENITIES {
            if flag(preferences) && !amenities.iter().any(|a| a.eq_ignore_ascii_case(label)) {
                amenities.push((*label).to_string());
            }
        }

        Self {
            min_price,
            max_price,
            bedrooms: preferences.bedrooms.clone(),
            bathrooms: preferences.bathrooms.clone(),
            max_distance,
            amenities,
            available_only: true,
        }
    }

    /// True when the query imposes nothing beyond availability.
    pub fn is_availability_only(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.bedrooms.is_empty()
            && self.bathrooms.is_empty()
            && self.max_distance.is_none()
            && self.amenities.is_empty()
    }

    /// Evaluate the filter against one listing. Amenity comparison is
    /// case-insensitive per the preference-record contract.
    pub fn matches(&self, listing: &Listing) -> bool {
        if self.available_only && !listing.available {
            return false;
        }
        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }
        if !self.bedrooms.is_empty() && !self.bedrooms.contains(&listing.bedrooms) {
            return false;
        }
        if !self.bathrooms.is_empty() && !self.bathrooms.contains(&listing.bathrooms) {
            return false;
        }
        if let Some(max_distance) = self.max_distance {
            if listing.distance_to_campus > max_distance {
                return false;
            }
        }
        if !self.amenities.is_empty() {
            let overlaps = self.amenities.iter().any(|wanted| {
                listing
                    .amenities
                    .iter()
                    .any(|offered| offered.eq_ignore_ascii_case(wanted))
            });
            if !overlaps {
                return false;
            }
        }
        true
    }
}
