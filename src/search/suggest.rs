//! Canned search suggestions for partial queries. A static list filtered by
//! containment, not an autocomplete over real inventory.

const SEARCH_SUGGESTIONS: [&str; 10] = [
    "pet friendly apartment under $1200",
    "furnished studio near campus",
    "2 bedroom house with parking",
    "cheap housing with laundry",
    "luxury apartment with pool",
    "quiet neighborhood near campus",
    "furnished room for rent",
    "apartment with gym access",
    "house with yard and pets allowed",
    "modern apartment with wifi",
];

const MIN_QUERY_LEN: usize = 2;
const MAX_SUGGESTIONS: usize = 5;

/// Up to five suggestions containing the partial query, case-insensitively.
/// Queries shorter than two characters yield nothing. The input is matched
/// as-is; whitespace counts toward the length and the containment check.
pub fn suggestions(partial: &str) -> Vec<String> {
    if partial.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }
    let needle = partial.to_lowercase();

    SEARCH_SUGGESTIONS
        .iter()
        .filter(|suggestion| suggestion.contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(|suggestion| suggestion.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_queries_yield_nothing() {
        assert!(suggestions("").is_empty());
        assert!(suggestions("a").is_empty());
        assert!(suggestions(" ").is_empty());
    }

    #[test]
    fn whitespace_counts_toward_length_and_matching() {
        // " f" clears the two-character gate and matches word boundaries
        let results = suggestions(" f");
        assert!(!results.is_empty());
        assert!(results.iter().all(|s| s.contains(" f")));

        // long enough, but nothing contains " a " literally
        assert!(suggestions(" a ").is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let results = suggestions("FURNISHED");
        assert_eq!(results.len(), 2);
        assert!(results[0].contains("furnished"));
    }

    #[test]
    fn results_cap_at_five() {
        let results = suggestions("apartment");
        assert!(results.len() <= MAX_SUGGESTIONS);
        assert!(!results.is_empty());
    }

    #[test]
    fn unmatched_queries_yield_nothing() {
        assert!(suggestions("castle with moat").is_empty());
    }
}
