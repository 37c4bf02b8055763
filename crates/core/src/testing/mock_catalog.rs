//! Mock catalog client for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{CatalogClient, CatalogError, CatalogItem, SearchPage};

/// A recorded catalog call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedQuery {
    SearchByTerm { term: String, page: u32 },
    FetchById { id: String },
}

/// Mock implementation of the [`CatalogClient`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configured pages and detail records
/// - Track queries for assertions
/// - Simulate failures and slow responses
///
/// Terms are matched case-insensitively after trimming. An unconfigured term
/// or identifier answers `NotFound`, like the real catalog.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    /// Pages by (normalized term, page).
    pages: Arc<RwLock<HashMap<(String, u32), SearchPage>>>,
    /// Detail records by id.
    details: Arc<RwLock<HashMap<String, CatalogItem>>>,
    /// Artificial latency by normalized term or id.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

fn key(term: &str) -> String {
    term.trim().to_lowercase()
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Answer `term` at `page` with `items`, reporting `total_count` matches.
    pub async fn set_page(&self, term: &str, page: u32, items: Vec<CatalogItem>, total_count: u32) {
        self.pages
            .write()
            .await
            .insert((key(term), page), SearchPage { items, total_count });
    }

    /// Add a detail record returned by `fetch_by_id`.
    pub async fn add_details(&self, item: CatalogItem) {
        self.details.write().await.insert(item.id.clone(), item);
    }

    /// Delay every answer for `term_or_id`.
    pub async fn set_delay(&self, term_or_id: &str, delay: Duration) {
        self.delays.write().await.insert(key(term_or_id), delay);
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedQuery) {
        self.queries.write().await.push(query);
    }

    async fn wait(&self, term_or_id: &str) {
        let delay = self.delays.read().await.get(&key(term_or_id)).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn search_by_term(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError> {
        self.record(RecordedQuery::SearchByTerm {
            term: term.to_string(),
            page,
        })
        .await;
        self.wait(term).await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.pages
            .read()
            .await
            .get(&(key(term), page))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("Movie not found!".to_string()))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<CatalogItem, CatalogError> {
        self.record(RecordedQuery::FetchById { id: id.to_string() })
            .await;
        self.wait(id).await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.details
            .read()
            .await
            .get(id.trim())
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("Incorrect IMDb ID.".to_string()))
    }
}
