use serde::Serialize;
use thiserror::Error;

/// Errors for user-entered search text
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search query too long ({len} > {max} characters)")]
    TooLong { len: usize, max: usize },
}

/// A validated, trimmed search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim and length-check. Length counts characters, not bytes.
    pub fn parse(raw: &str, max_len: usize) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len > max_len {
            return Err(SearchError::TooLong { len, max: max_len });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty queries are valid but the shell doesn't run a server search for them
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Shortcut buttons under the search bar
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickSearchItem {
    pub label: &'static str,
    pub service: &'static str,
}

pub const QUICK_SEARCH_ITEMS: [QuickSearchItem; 4] = [
    QuickSearchItem { label: "Netflix", service: "netflix" },
    QuickSearchItem { label: "Gaming", service: "gaming" },
    QuickSearchItem { label: "YouTube", service: "youtube" },
    QuickSearchItem { label: "Browse", service: "browse" },
];
