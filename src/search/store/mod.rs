//! Listing persistence boundary.
//!
//! The search pipeline only ever reads listings; the trait keeps the service
//! testable in isolation and lets a real database back the same contract.

mod csv_import;
mod memory;

pub use csv_import::{listings_from_path, listings_from_reader, ListingImportError};
pub use memory::MemoryListingStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::query::ListingQuery;

/// One advertised housing option. Owned by the store; the pipeline reads it
/// and annotates copies, never mutating the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: u32,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub distance_to_campus: f32,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction for querying listings by filter, newest first.
pub trait ListingStore: Send + Sync {
    fn find(&self, query: &ListingQuery, limit: usize) -> Result<Vec<Listing>, StoreError>;
}

/// Error enumeration for store failures. Propagated unchanged to the caller;
/// the pipeline has no retry policy and nothing to roll back.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("listing store unavailable: {0}")]
    Unavailable(String),
}
