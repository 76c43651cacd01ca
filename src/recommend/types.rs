use serde::Serialize;

use crate::catalog::ServerRecord;

/// A server paired with why it was picked.
/// `confidence` is a heuristic relevance score in (0, 1], not a probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub server: ServerRecord,
    pub reason: String,
    pub confidence: f64,
}

/// Scoring strategy selected by a category keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum Category {
    /// Label goes into the reason string ("Netflix", "Streaming")
    Streaming(&'static str),
    Gaming,
    Torrenting,
    LowPing,
    Fastest,
    /// Full country name matched by containment
    Country(&'static str),
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Streaming(_) => "streaming",
            Category::Gaming => "gaming",
            Category::Torrenting => "torrenting",
            Category::LowPing => "low_ping",
            Category::Fastest => "fastest",
            Category::Country(_) => "country",
        }
    }
}
