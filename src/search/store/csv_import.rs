//! Seed the listing store from a CSV export.
//!
//! Column layout: `id,title,description,price,bedrooms,bathrooms,amenities,
//! images,distance_to_campus,available,created_at`. The `amenities` and
//! `images` cells hold semicolon-separated values; `available` defaults to
//! true and `created_at` to the import time when the cells are blank.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use super::Listing;

#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("failed to read listing csv: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed listing csv: {0}")]
    Csv(#[from] csv::Error),
}

pub fn listings_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>, ListingImportError> {
    let file = std::fs::File::open(path)?;
    listings_from_reader(file)
}

pub fn listings_from_reader<R: Read>(reader: R) -> Result<Vec<Listing>, ListingImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut listings = Vec::new();
    for record in csv_reader.deserialize::<ListingRow>() {
        listings.push(record?.into_listing());
    }
    Ok(listings)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: String,
    title: String,
    description: String,
    price: u32,
    bedrooms: u32,
    bathrooms: f32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    amenities: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    images: Option<String>,
    distance_to_campus: f32,
    #[serde(default)]
    available: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl ListingRow {
    fn into_listing(self) -> Listing {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now);

        Listing {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: split_list(self.amenities.as_deref()),
            images: split_list(self.images.as_deref()),
            distance_to_campus: self.distance_to_campus,
            available: self.available.unwrap_or(true),
            created_at,
        }
    }
}

fn split_list(cell: Option<&str>) -> Vec<String> {
    cell.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}
