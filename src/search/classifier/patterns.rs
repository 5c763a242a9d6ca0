//! Process-wide read-only pattern tables.
//!
//! Every table is an ordered list evaluated first-to-last; declared order is
//! load-bearing for the first-match-wins extractors, so the tables must not
//! be collapsed into combined alternations.

use lazy_static::lazy_static;
use regex::Regex;

use super::domain::HousingType;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("static pattern compiles"))
        .collect()
}

fn compile_labeled(patterns: &[(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    patterns
        .iter()
        .map(|(pattern, label)| {
            (
                Regex::new(pattern).expect("static pattern compiles"),
                *label,
            )
        })
        .collect()
}

lazy_static! {
    pub(crate) static ref NUMBER: Regex = Regex::new(r"\d+").expect("static pattern compiles");

    /// Budget patterns. The qualitative tail entries (affordable, cheap,
    /// expensive, luxury) match but carry no numeric capture, so they never
    /// produce a budget value on their own.
    pub(crate) static ref BUDGET_PATTERNS: Vec<Regex> = compile(&[
        r"\$(\d+)",
        r"(\d+)\s*dollars?",
        r"under\s*\$?(\d+)",
        r"less\s*than\s*\$?(\d+)",
        r"max\s*\$?(\d+)",
        r"budget\s*of\s*\$?(\d+)",
        r"affordable",
        r"cheap",
        r"expensive",
        r"luxury",
    ]);

    pub(crate) static ref BEDROOM_PATTERNS: Vec<Regex> = compile(&[
        r"(\d+)\s*bed",
        r"(\d+)\s*bedroom",
        r"(\d+)\s*bedroom\s*house",
        r"(\d+)\s*bedroom\s*apartment",
        r"(\d+)\s*bedroom\s*home",
        r"(\d+)\s*bedroom\s*place",
        r"studio",
        r"one\s*bed",
        r"two\s*bed",
        r"three\s*bed",
        r"four\s*bed",
        r"single",
        r"double",
        r"(\d+)\s*br",
        r"(\d+)\s*br\s*house",
        r"(\d+)\s*br\s*apartment",
    ]);

    pub(crate) static ref BATHROOM_PATTERNS: Vec<Regex> = compile(&[
        r"(\d+)\s*bath",
        r"(\d+)\s*bathroom",
        r"half\s*bath",
        r"full\s*bath",
        r"shared\s*bath",
        r"private\s*bath",
    ]);

    /// Amenity vocabulary, each pattern paired with the human-readable label
    /// recorded in the preference record when it matches.
    pub(crate) static ref AMENITY_PATTERNS: Vec<(Regex, &'static str)> = compile_labeled(&[
        (r"pet\s*friendly", "pet friendly"),
        (r"furnished", "furnished"),
        (r"unfurnished", "unfurnished"),
        (r"parking", "parking"),
        (r"garage", "garage"),
        (r"laundry", "laundry"),
        (r"washer", "washer"),
        (r"dryer", "dryer"),
        (r"wifi", "wifi"),
        (r"internet", "internet"),
        (r"air\s*conditioning", "air conditioning"),
        (r"heating", "heating"),
        (r"dishwasher", "dishwasher"),
        (r"pool", "pool"),
        (r"gym", "gym"),
        (r"fitness", "fitness"),
        (r"balcony", "balcony"),
        (r"patio", "patio"),
        (r"yard", "yard"),
        (r"garden", "garden"),
        (r"fireplace", "fireplace"),
        (r"hardwood", "hardwood"),
        (r"carpet", "carpet"),
        (r"tile", "tile"),
    ]);

    pub(crate) static ref LOCATION_KEYWORD_PATTERNS: Vec<(Regex, &'static str)> =
        compile_labeled(&[
            (r"near\s*campus", "near campus"),
            (r"close\s*to\s*campus", "close to campus"),
            (r"walking\s*distance", "walking distance"),
            (r"downtown", "downtown"),
            (r"city\s*center", "city center"),
            (r"suburbs", "suburbs"),
            (r"quiet", "quiet"),
            (r"busy", "busy"),
            (r"safe", "safe"),
            (r"unsafe", "unsafe"),
        ]);

    pub(crate) static ref DISTANCE_PATTERNS: Vec<Regex> = compile(&[
        r"(\d+)\s*miles?",
        r"(\d+)\s*blocks?",
        r"(\d+)\s*minutes?\s*walk",
        r"(\d+)\s*minutes?\s*drive",
    ]);

    pub(crate) static ref NEAR_CAMPUS: Regex =
        Regex::new(r"near\s*campus|close\s*to\s*campus|walking\s*distance|short\s*walk")
            .expect("static pattern compiles");

    pub(crate) static ref LEASE_PATTERNS: Vec<Regex> = compile(&[
        r"(\d+)\s*month",
        r"(\d+)\s*month\s*lease",
        r"year\s*lease",
        r"short\s*term",
        r"long\s*term",
        r"flexible",
        r"sublet",
    ]);

    pub(crate) static ref SEARCH_INTENT: Regex =
        Regex::new(r"find|search|look|need|want|looking\s*for").expect("static pattern compiles");
    pub(crate) static ref DISPLAY_INTENT: Regex =
        Regex::new(r"show|display|list").expect("static pattern compiles");
    pub(crate) static ref RECOMMEND_INTENT: Regex =
        Regex::new(r"recommend|suggest").expect("static pattern compiles");
}

/// Housing-type keyword groups, checked in declared order with the first
/// group containing any matching keyword winning.
pub(crate) const HOUSING_TYPE_GROUPS: &[(HousingType, &[&str])] = &[
    (HousingType::Apartment, &["apartment", "apt", "unit", "flat"]),
    (
        HousingType::House,
        &["house", "home", "residence", "property"],
    ),
    (
        HousingType::Condo,
        &["condo", "condominium", "townhouse"],
    ),
    (HousingType::Studio, &["studio", "efficiency"]),
    (
        HousingType::Shared,
        &["shared", "roommate", "room", "sublet"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tables_compile() {
        assert_eq!(BUDGET_PATTERNS.len(), 10);
        assert_eq!(BEDROOM_PATTERNS.len(), 16);
        assert_eq!(BATHROOM_PATTERNS.len(), 6);
        assert_eq!(AMENITY_PATTERNS.len(), 24);
        assert_eq!(DISTANCE_PATTERNS.len(), 4);
        assert_eq!(LEASE_PATTERNS.len(), 7);
    }

    #[test]
    fn budget_table_leads_with_dollar_amounts() {
        assert!(BUDGET_PATTERNS[0].is_match("$950"));
        assert!(BUDGET_PATTERNS[6].is_match("affordable"));
    }

    #[test]
    fn near_campus_covers_all_phrasings() {
        for phrase in [
            "near campus",
            "close to campus",
            "walking distance",
            "short walk",
        ] {
            assert!(NEAR_CAMPUS.is_match(phrase), "{phrase} should match");
        }
        assert!(!NEAR_CAMPUS.is_match("long walk"));
    }
}
