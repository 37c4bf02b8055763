//! Recent search terms.
//!
//! `RecentQueries` holds the bounded most-recent-first list; `RecentQueriesLog`
//! persists it after every change. Independent of favorites.

mod store;

pub use store::RecentQueriesLog;

/// Maximum number of remembered terms.
pub const MAX_RECENT_QUERIES: usize = 10;

/// Terms shorter than this (after normalization) are not remembered.
pub const MIN_RECORDED_LEN: usize = 3;

/// Trim and lower-case a term.
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Bounded, de-duplicated, most-recent-first list of normalized terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentQueries {
    terms: Vec<String>,
}

impl RecentQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored list, re-applying normalization and bounds.
    pub fn from_terms(terms: impl IntoIterator<Item = String>) -> Self {
        let mut normalized: Vec<String> = Vec::new();
        for term in terms {
            let term = normalize(&term);
            if term.chars().count() >= MIN_RECORDED_LEN && !normalized.contains(&term) {
                normalized.push(term);
            }
        }
        normalized.truncate(MAX_RECENT_QUERIES);
        Self { terms: normalized }
    }

    /// Move `term` to the front. Returns false when the term is too short.
    pub fn record(&mut self, term: &str) -> bool {
        let term = normalize(term);
        if term.chars().count() < MIN_RECORDED_LEN {
            return false;
        }
        self.terms.retain(|t| *t != term);
        self.terms.insert(0, term);
        self.terms.truncate(MAX_RECENT_QUERIES);
        true
    }

    pub fn remove(&mut self, term: &str) -> bool {
        let term = normalize(term);
        let before = self.terms.len();
        self.terms.retain(|t| *t != term);
        self.terms.len() != before
    }

    pub fn clear(&mut self) -> bool {
        let had_terms = !self.terms.is_empty();
        self.terms.clear();
        had_terms
    }

    /// Terms, most recent first.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
