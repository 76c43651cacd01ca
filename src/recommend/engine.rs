use tracing::debug;

use crate::catalog::ServerRecord;
use crate::recommend::scoring;
use crate::recommend::types::{Category, Recommendation};

/// Keyword → category, checked top to bottom. First containment match wins,
/// so "netflix gaming" routes to streaming.
pub const DISPATCH: &[(&str, Category)] = &[
    ("netflix", Category::Streaming("Netflix")),
    ("streaming", Category::Streaming("Streaming")),
    ("gaming", Category::Gaming),
    ("torrenting", Category::Torrenting),
    ("low ping", Category::LowPing),
    ("fastest", Category::Fastest),
    ("usa", Category::Country("United States")),
    ("uk", Category::Country("United Kingdom")),
    ("japan", Category::Country("Japan")),
];

/// Normalize a raw query: trim + lowercase
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Which category a normalized query routes to (None → location search)
pub fn dispatch(normalized: &str) -> Option<(&'static str, Category)> {
    DISPATCH
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .copied()
}

pub fn score(servers: &[ServerRecord], category: Category) -> Vec<Recommendation> {
    match category {
        Category::Streaming(service) => scoring::streaming(servers, service),
        Category::Gaming => scoring::gaming(servers),
        Category::Torrenting => scoring::torrenting(servers),
        Category::LowPing => scoring::low_ping(servers),
        Category::Fastest => scoring::fastest(servers),
        Category::Country(country) => scoring::country(servers, country),
    }
}

/// Ranked server suggestions for a free-text query or quick-action tag.
/// Pure and read-only over `servers`; an empty result is a valid answer.
pub fn recommend(servers: &[ServerRecord], query: &str) -> Vec<Recommendation> {
    let normalized = normalize(query);

    let results = match dispatch(&normalized) {
        Some((keyword, category)) => {
            debug!("🧭 '{}' matched keyword '{}' → {}", normalized, keyword, category.name());
            score(servers, category)
        }
        None => {
            debug!("🧭 '{}' matched no keyword → location search", normalized);
            scoring::location(servers, &normalized)
        }
    };

    debug!("🧭 {} recommendation(s) for '{}'", results.len(), normalized);
    results
}
