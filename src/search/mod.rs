//! Text-to-filter classification and result-ranking pipeline.
//!
//! Flow: raw text -> [`classifier::classify`] -> [`query::ListingQuery`] ->
//! listing store -> [`enhance::enhance`] -> [`rank::rank`] -> ranked results
//! plus classification metadata, orchestrated by [`service::SearchService`].

pub mod classifier;
pub mod enhance;
pub mod query;
pub mod rank;
pub mod router;
pub mod service;
pub mod store;
pub mod suggest;

pub use classifier::{classify, ClassificationResult, Preferences, SearchFilters};
pub use enhance::{enhance, EnhancedListing, RelevanceIndicators};
pub use query::ListingQuery;
pub use rank::{rank, RankedListing, MAX_RESULTS};
pub use router::search_router;
pub use service::{SearchError, SearchOutcome, SearchService};
pub use store::{Listing, ListingStore, MemoryListingStore, StoreError};
