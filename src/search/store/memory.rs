use chrono::{Duration, Utc};

use super::{Listing, ListingStore, StoreError};
use crate::search::query::ListingQuery;

/// In-memory listing store. Backs the demo CLI, the default server store, and
/// the test suites; a production deployment would substitute a database-backed
/// implementation of the same trait.
pub struct MemoryListingStore {
    listings: Vec<Listing>,
}

impl MemoryListingStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Store seeded with the built-in demo inventory.
    pub fn with_demo_listings() -> Self {
        Self::new(demo_listings())
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl ListingStore for MemoryListingStore {
    fn find(&self, query: &ListingQuery, limit: usize) -> Result<Vec<Listing>, StoreError> {
        let mut matched: Vec<Listing> = self
            .listings
            .iter()
            .filter(|listing| query.matches(listing))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(limit);
        Ok(matched)
    }
}

fn listing(
    id: &str,
    title: &str,
    description: &str,
    price: u32,
    bedrooms: u32,
    bathrooms: f32,
    amenities: &[&str],
    distance_to_campus: f32,
    days_old: i64,
) -> Listing {
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        bedrooms,
        bathrooms,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        images: vec![format!(
            "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=800&h=600&fit=crop&sig={id}"
        )],
        distance_to_campus,
        available: true,
        created_at: Utc::now() - Duration::days(days_old),
    }
}

/// Demo inventory mirroring the kind of stock a campus market carries.
pub fn demo_listings() -> Vec<Listing> {
    vec![
        listing(
            "bbg-001",
            "Modern Apartment Near Campus",
            "Beautiful 2-bedroom apartment with modern amenities, just 0.8 miles from campus.",
            1200,
            2,
            1.5,
            &["Parking", "Laundry", "WiFi", "Furnished"],
            0.8,
            1,
        ),
        listing(
            "bbg-002",
            "Cozy House with Yard",
            "Charming 3-bedroom house with a private yard, ideal for students who want more space.",
            1800,
            3,
            2.0,
            &["Parking", "Laundry", "WiFi", "Yard", "Dishwasher"],
            1.5,
            2,
        ),
        listing(
            "bbg-003",
            "Studio Apartment Downtown",
            "Compact studio in the heart of downtown. Perfect for single students.",
            800,
            1,
            1.0,
            &["WiFi", "Furnished"],
            0.5,
            3,
        ),
        listing(
            "bbg-004",
            "Luxury Condo Complex",
            "High-end 2-bedroom condo with premium amenities including gym and pool.",
            2200,
            2,
            2.0,
            &["Parking", "Laundry", "WiFi", "Furnished", "Gym", "Pool"],
            1.2,
            4,
        ),
        listing(
            "bbg-005",
            "Pet-Friendly Garden Apartment",
            "Ground-floor 1-bedroom with a shared garden. Cats and dogs welcome.",
            950,
            1,
            1.0,
            &["Pet Friendly", "Parking", "Laundry", "Garden"],
            2.4,
            5,
        ),
        listing(
            "bbg-006",
            "Historic 3BR Victorian House",
            "Restored Victorian with hardwood floors and plenty of character.",
            1650,
            3,
            2.0,
            &["Parking", "Laundry", "WiFi", "Hardwood"],
            2.2,
            6,
        ),
        listing(
            "bbg-007",
            "Modern 2BR Apartment Complex",
            "Recently built complex with a fitness center and on-site management.",
            1350,
            2,
            2.0,
            &["Parking", "Laundry", "WiFi", "Furnished", "Fitness Center"],
            1.3,
            7,
        ),
        listing(
            "bbg-008",
            "Cozy 3BR Cottage",
            "Quiet cottage with a front porch and garden space, a short drive from campus.",
            1550,
            3,
            1.5,
            &["Parking", "Laundry", "WiFi", "Garden"],
            3.2,
            8,
        ),
    ]
}
