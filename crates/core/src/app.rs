//! Application state container.
//!
//! `App` is created once at startup and handed to the presentation layer.
//! It sequences every user intent: synchronous state transitions under a
//! short-lived lock, the catalog call with no lock held, then persistence.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::catalog::{
    CatalogClient, CatalogError, CatalogItem, OmdbClient, SearchPage, UnavailableCatalog,
};
use crate::config::{Config, StorageBackend};
use crate::favorites::{FavoritesStore, Toggled};
use crate::recent::RecentQueriesLog;
use crate::search::{
    Completion, SearchError, SearchMachine, SearchMode, SearchSession, SearchTicket,
};
use crate::stats::{summarize, FavoritesStats};
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

/// Result of a search or load-more intent.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Nothing was dispatched (blank term, or no further page to load).
    Skipped,
    /// The response was applied; the session as it stands afterwards.
    Completed(SearchSession),
    /// A newer search or a clear took over before the response landed.
    Superseded,
}

/// Shared application state.
pub struct App {
    catalog: Arc<dyn CatalogClient>,
    search: Mutex<SearchMachine>,
    favorites: Mutex<FavoritesStore>,
    recent: Mutex<RecentQueriesLog>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl App {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        storage: Arc<dyn KeyValueStore>,
        min_query_len: usize,
    ) -> Self {
        let favorites = FavoritesStore::load(Arc::clone(&storage));
        let recent = RecentQueriesLog::load(storage);
        info!(
            "Loaded {} favorites and {} recent queries",
            favorites.len(),
            recent.terms().len()
        );

        Self {
            catalog,
            search: Mutex::new(SearchMachine::new(min_query_len)),
            favorites: Mutex::new(favorites),
            recent: Mutex::new(recent),
        }
    }

    /// Build the catalog client and storage backend described by `config`.
    ///
    /// A catalog client that cannot be built (usually a missing API key) is
    /// replaced by one that reports the problem on every search.
    pub fn from_config(config: &Config) -> Result<Self, StorageError> {
        let storage: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Sqlite => {
                info!("Opening storage at {:?}", config.storage.path);
                Arc::new(SqliteStore::new(&config.storage.path)?)
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Arc::new(MemoryStore::new())
            }
        };

        let catalog: Arc<dyn CatalogClient> = match OmdbClient::new(config.catalog.clone()) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("Catalog unavailable: {}", e);
                Arc::new(UnavailableCatalog::new(e.to_string()))
            }
        };

        Ok(Self::new(catalog, storage, config.search.min_query_len))
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Search for `term`. Page 1 replaces the results, later pages append.
    ///
    /// Too-short terms are rejected before any request is made. Catalog
    /// failures are not errors here; they land in the session.
    pub async fn search(&self, term: &str, page: u32) -> Result<SearchOutcome, SearchError> {
        let ticket = {
            let mut machine = lock(&self.search);
            machine.begin(term, page)?
        };
        match ticket {
            Some(ticket) => Ok(self.dispatch(ticket).await),
            None => Ok(SearchOutcome::Skipped),
        }
    }

    /// Fetch the next page of the current search.
    pub async fn load_more(&self) -> SearchOutcome {
        let ticket = {
            let mut machine = lock(&self.search);
            machine.begin_load_more()
        };
        match ticket {
            Some(ticket) => self.dispatch(ticket).await,
            None => SearchOutcome::Skipped,
        }
    }

    /// Drop the current search and invalidate any request still in flight.
    pub fn clear_search(&self) {
        lock(&self.search).clear();
        debug!("Search cleared");
    }

    /// Snapshot of the current search session.
    pub fn session(&self) -> SearchSession {
        lock(&self.search).session().clone()
    }

    /// Detail view lookup. Not a search: nothing is recorded.
    pub async fn details(&self, id: &str) -> Result<CatalogItem, CatalogError> {
        self.catalog.fetch_by_id(id).await
    }

    async fn dispatch(&self, ticket: SearchTicket) -> SearchOutcome {
        info!(
            "Search #{}: '{}' page {} ({:?})",
            ticket.seq, ticket.term, ticket.page, ticket.mode
        );

        let result = tokio::select! {
            _ = ticket.token.cancelled() => {
                debug!("Search #{} cancelled before the catalog answered", ticket.seq);
                return SearchOutcome::Superseded;
            }
            result = self.query_catalog(&ticket) => result,
        };

        if let Err(e) = &result {
            debug!("Search #{} failed: {}", ticket.seq, e);
        }
        let succeeded = result.is_ok();

        let session = {
            let mut machine = lock(&self.search);
            match machine.complete(&ticket, result) {
                Completion::Stale => return SearchOutcome::Superseded,
                Completion::Applied => machine.session().clone(),
            }
        };

        if succeeded {
            lock(&self.recent).record(&ticket.term);
        }
        SearchOutcome::Completed(session)
    }

    async fn query_catalog(&self, ticket: &SearchTicket) -> Result<SearchPage, CatalogError> {
        match ticket.mode {
            SearchMode::Title => self.catalog.search_by_term(&ticket.term, ticket.page).await,
            SearchMode::Identifier => {
                let item = self.catalog.fetch_by_id(&ticket.term).await?;
                Ok(SearchPage {
                    items: vec![item],
                    total_count: 1,
                })
            }
        }
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Favorites in insertion order.
    pub fn favorites(&self) -> Vec<CatalogItem> {
        lock(&self.favorites).items().to_vec()
    }

    pub fn favorite(&self, id: &str) -> Option<CatalogItem> {
        lock(&self.favorites).get(id).cloned()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        lock(&self.favorites).contains(id)
    }

    pub fn add_favorite(&self, item: CatalogItem) -> bool {
        lock(&self.favorites).add(item)
    }

    /// Add by identifier, using the current results when the item is there
    /// and the catalog otherwise.
    pub async fn add_favorite_by_id(&self, id: &str) -> Result<bool, CatalogError> {
        let id = id.trim();
        if self.is_favorite(id) {
            return Ok(false);
        }

        let known = lock(&self.search)
            .session()
            .items()
            .iter()
            .find(|i| i.id == id)
            .cloned();
        let item = match known {
            Some(item) => item,
            None => self.catalog.fetch_by_id(id).await?,
        };

        Ok(self.add_favorite(item))
    }

    pub fn remove_favorite(&self, id: &str) -> bool {
        lock(&self.favorites).remove(id)
    }

    pub fn toggle_favorite(&self, item: CatalogItem) -> Toggled {
        lock(&self.favorites).toggle(item)
    }

    pub fn clear_favorites(&self) -> bool {
        lock(&self.favorites).clear()
    }

    /// Statistics over the current favorites.
    pub fn stats(&self) -> FavoritesStats {
        summarize(lock(&self.favorites).items())
    }

    // =========================================================================
    // Recent queries
    // =========================================================================

    /// Recent search terms, most recent first.
    pub fn recent_queries(&self) -> Vec<String> {
        lock(&self.recent).terms().to_vec()
    }

    pub fn remove_recent(&self, term: &str) -> bool {
        lock(&self.recent).remove(term)
    }

    pub fn clear_recent(&self) -> bool {
        lock(&self.recent).clear()
    }
}
