use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Price ceiling assumed when a query carries no budget signal.
pub const DEFAULT_MAX_PRICE: u32 = 2000;
/// Distance ceiling (miles) assumed when a query carries no location signal.
pub const DEFAULT_DISTANCE_MILES: f32 = 5.0;
/// Cap applied when the query asks to be near campus.
pub const NEAR_CAMPUS_CAP_MILES: f32 = 2.0;
/// Lease length (months) assumed absent other signal.
pub const DEFAULT_LEASE_MONTHS: u32 = 12;

/// Supported campuses. A single campus is served today; the enum keeps the
/// preference record honest about where the default comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Campus {
    Blacksburg,
}

impl Campus {
    pub const fn label(self) -> &'static str {
        match self {
            Campus::Blacksburg => "blacksburg",
        }
    }
}

/// What the user wants the service to do with the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Search,
    Display,
    Recommendation,
}

impl Intent {
    pub const fn label(self) -> &'static str {
        match self {
            Intent::Search => "search",
            Intent::Display => "display",
            Intent::Recommendation => "recommendation",
        }
    }
}

/// Housing category inferred from the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    Apartment,
    House,
    Condo,
    Studio,
    Shared,
}

impl HousingType {
    pub const fn label(self) -> &'static str {
        match self {
            HousingType::Apartment => "apartment",
            HousingType::House => "house",
            HousingType::Condo => "condo",
            HousingType::Studio => "studio",
            HousingType::Shared => "shared",
        }
    }
}

/// Inclusive monthly rent bounds. Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

/// The structured want-list synthesized from one query. Created fresh per
/// request and discarded with the response.
///
/// The amenity convenience flags (`pet_friendly`, `furnished`, ...) are
/// computed accessors over `amenities` rather than stored fields, so they can
/// never drift out of sync with the set they summarize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preferences {
    pub campus: Campus,
    pub price_range: PriceRange,
    pub bedrooms: Vec<u32>,
    pub bathrooms: Vec<f32>,
    pub amenities: Vec<String>,
    pub distance_to_campus: f32,
    pub lease_length: Option<u32>,
    pub move_in_date: NaiveDate,
}

impl Preferences {
    /// The record used when nothing was extracted from the query.
    pub fn default_record() -> Self {
        Self {
            campus: Campus::Blacksburg,
            price_range: PriceRange {
                min: 0,
                max: DEFAULT_MAX_PRICE,
            },
            bedrooms: Vec::new(),
            bathrooms: Vec::new(),
            amenities: Vec::new(),
            distance_to_campus: DEFAULT_DISTANCE_MILES,
            lease_length: Some(DEFAULT_LEASE_MONTHS),
            move_in_date: Local::now().date_naive(),
        }
    }

    fn has_amenity_token(&self, token: &str) -> bool {
        self.amenities
            .iter()
            .any(|label| label.to_lowercase().contains(token))
    }

    pub fn pet_friendly(&self) -> bool {
        self.has_amenity_token("pet")
    }

    pub fn furnished(&self) -> bool {
        self.has_amenity_token("furnished")
    }

    pub fn parking(&self) -> bool {
        self.has_amenity_token("parking")
    }

    pub fn laundry(&self) -> bool {
        self.has_amenity_token("laundry")
    }

    pub fn wifi(&self) -> bool {
        self.has_amenity_token("wifi")
    }

    /// Materialize the record plus its derived flags for API responses.
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            campus: self.campus,
            price_range: self.price_range,
            bedrooms: self.bedrooms.clone(),
            bathrooms: self.bathrooms.clone(),
            amenities: self.amenities.clone(),
            distance_to_campus: self.distance_to_campus,
            pet_friendly: self.pet_friendly(),
            furnished: self.furnished(),
            parking: self.parking(),
            laundry: self.laundry(),
            wifi: self.wifi(),
            lease_length: self.lease_length,
            move_in_date: self.move_in_date,
        }
    }
}

/// Serialized view of [`Preferences`] with the convenience flags expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchFilters {
    pub campus: Campus,
    pub price_range: PriceRange,
    pub bedrooms: Vec<u32>,
    pub bathrooms: Vec<f32>,
    pub amenities: Vec<String>,
    pub distance_to_campus: f32,
    pub pet_friendly: bool,
    pub furnished: bool,
    pub parking: bool,
    pub laundry: bool,
    pub wifi: bool,
    pub lease_length: Option<u32>,
    pub move_in_date: NaiveDate,
}

/// Extraction category an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Budget,
    Bedrooms,
    Bathrooms,
    Amenities,
    Location,
    Lease,
}

/// Distance signal pulled from the query text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSignal {
    pub distance: f32,
    pub near_campus: bool,
    pub keywords: Vec<String>,
}

/// Category-dependent payload of an extracted entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityValue {
    Budget(u32),
    Bedrooms(Vec<u32>),
    Bathrooms(Vec<f32>),
    Amenities(Vec<String>),
    Location(LocationSignal),
    Lease(u32),
}

/// One discrete piece of structured evidence pulled from free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: EntityValue,
    pub confidence: f32,
}

/// Full classifier output for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub original_input: String,
    pub intent: Intent,
    pub housing_type: HousingType,
    pub preferences: Preferences,
    pub extracted_entities: Vec<ExtractedEntity>,
    pub confidence: f32,
}

impl ClassificationResult {
    /// Bedroom counts explicitly requested in the query, taken from the first
    /// bedrooms entity. Empty when the query named none.
    pub fn required_bedrooms(&self) -> &[u32] {
        self.extracted_entities
            .iter()
            .find_map(|entity| match &entity.value {
                EntityValue::Bedrooms(counts) if entity.kind == EntityKind::Bedrooms => {
                    Some(counts.as_slice())
                }
                _ => None,
            })
            .unwrap_or(&[])
    }
}
