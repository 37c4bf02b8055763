//! Persisted recent-queries log.

use std::sync::Arc;

use tracing::{debug, warn};

use super::RecentQueries;
use crate::storage::{KeyValueStore, StorageError, RECENT_QUERIES_KEY};

/// Recent queries backed by a key-value store.
pub struct RecentQueriesLog {
    queries: RecentQueries,
    storage: Arc<dyn KeyValueStore>,
}

impl RecentQueriesLog {
    /// Load the log. Missing or malformed data loads as empty.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let queries = match storage.get(RECENT_QUERIES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(terms) => RecentQueries::from_terms(terms),
                Err(e) => {
                    warn!("Stored recent queries are unreadable, starting empty: {}", e);
                    RecentQueries::new()
                }
            },
            Ok(None) => RecentQueries::new(),
            Err(e) => {
                warn!("Failed to read recent queries, starting empty: {}", e);
                RecentQueries::new()
            }
        };

        Self { queries, storage }
    }

    pub fn record(&mut self, term: &str) -> bool {
        let recorded = self.queries.record(term);
        if recorded {
            debug!("Recorded recent query '{}'", term.trim());
            self.persist();
        }
        recorded
    }

    pub fn remove(&mut self, term: &str) -> bool {
        let removed = self.queries.remove(term);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear(&mut self) -> bool {
        let cleared = self.queries.clear();
        if cleared {
            self.persist();
        }
        cleared
    }

    /// Terms, most recent first.
    pub fn terms(&self) -> &[String] {
        self.queries.terms()
    }

    fn persist(&self) {
        if let Err(e) = self.write() {
            warn!("Failed to persist recent queries: {}", e);
        }
    }

    fn write(&self) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(self.queries.terms()).map_err(|e| StorageError::Encode {
                key: RECENT_QUERIES_KEY.to_string(),
                message: e.to_string(),
            })?;
        self.storage.set(RECENT_QUERIES_KEY, &json)
    }
}
