use serde::Serialize;

use super::{FailureKind, SearchFailure, SearchMode};
use crate::catalog::{CatalogItem, SearchPage};

/// Where a search session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Idle,
    Searching,
    Populated,
    Empty,
    Errored,
}

/// Transient state of the current search.
///
/// Items keep arrival order and never share an `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSession {
    query: String,
    mode: SearchMode,
    items: Vec<CatalogItem>,
    total_count: u32,
    page: u32,
    /// Largest raw page length seen, before duplicates were dropped.
    #[serde(skip)]
    page_size: u32,
    /// The last page added nothing new.
    #[serde(skip)]
    exhausted: bool,
    loading: bool,
    error: Option<SearchFailure>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: String::new(),
            mode: SearchMode::Title,
            items: Vec::new(),
            total_count: 0,
            page: 1,
            page_size: 0,
            exhausted: false,
            loading: false,
            error: None,
        }
    }
}

impl SearchSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Total matches reported by the catalog.
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Last page loaded (1-based).
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&SearchFailure> {
        self.error.as_ref()
    }

    /// Whether pages beyond the current one should exist.
    ///
    /// Based on the page cursor and the catalog's page length rather than
    /// the item count, since the catalog repeats items across pages.
    pub fn has_more(&self) -> bool {
        if self.loading || self.error.is_some() || self.exhausted {
            return false;
        }
        u64::from(self.page) * u64::from(self.page_size) < u64::from(self.total_count)
    }

    pub fn status(&self) -> SearchStatus {
        if self.loading {
            return SearchStatus::Searching;
        }
        match &self.error {
            Some(failure) if failure.kind == FailureKind::NotFound => SearchStatus::Empty,
            Some(_) => SearchStatus::Errored,
            None if self.query.is_empty() => SearchStatus::Idle,
            None if self.items.is_empty() => SearchStatus::Empty,
            None => SearchStatus::Populated,
        }
    }

    /// Enter `Searching`. A first page, or a different query, drops the
    /// previous results.
    pub(super) fn start(&mut self, query: &str, mode: SearchMode, page_number: u32) {
        if page_number <= 1 || self.query != query {
            self.reset_results();
        }
        self.query = query.to_string();
        self.mode = mode;
        self.loading = true;
        self.error = None;
    }

    /// Page 1 replaces the list, later pages append unseen items.
    pub(super) fn apply_page(&mut self, page_number: u32, page: SearchPage) {
        if page_number <= 1 {
            self.reset_results();
        }
        let fetched = u32::try_from(page.items.len()).unwrap_or(u32::MAX);
        let before = self.items.len();
        for item in page.items {
            if !self.items.iter().any(|existing| existing.id == item.id) {
                self.items.push(item);
            }
        }
        self.page_size = self.page_size.max(fetched);
        self.exhausted = self.items.len() == before;
        self.total_count = page.total_count;
        self.page = page_number.max(1);
        self.loading = false;
        self.error = None;
    }

    pub(super) fn fail(&mut self, failure: SearchFailure) {
        self.reset_results();
        self.page = 1;
        self.loading = false;
        self.error = Some(failure);
    }

    fn reset_results(&mut self) {
        self.items.clear();
        self.total_count = 0;
        self.page_size = 0;
        self.exhausted = false;
    }
}
