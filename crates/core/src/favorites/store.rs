//! Persisted favorites store.

use std::sync::Arc;

use tracing::{info, warn};

use super::{FavoritesSet, Toggled};
use crate::catalog::CatalogItem;
use crate::storage::{KeyValueStore, StorageError, FAVORITES_KEY};

/// Favorites backed by a key-value store.
///
/// Every accepted mutation is written through before the call returns. A
/// failed write is logged and the in-memory change stands.
pub struct FavoritesStore {
    set: FavoritesSet,
    storage: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    /// Load favorites from `storage`.
    ///
    /// A missing, unreadable or malformed entry loads as an empty set.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let set = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CatalogItem>>(&raw) {
                Ok(items) => FavoritesSet::from_items(items),
                Err(e) => {
                    warn!("Stored favorites are unreadable, starting empty: {}", e);
                    FavoritesSet::new()
                }
            },
            Ok(None) => FavoritesSet::new(),
            Err(e) => {
                warn!("Failed to read favorites, starting empty: {}", e);
                FavoritesSet::new()
            }
        };

        Self { set, storage }
    }

    pub fn add(&mut self, item: CatalogItem) -> bool {
        let id = item.id.clone();
        let added = self.set.add(item);
        if added {
            info!("Added {} to favorites", id);
            self.persist();
        }
        added
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.set.remove(id);
        if removed {
            info!("Removed {} from favorites", id);
            self.persist();
        }
        removed
    }

    pub fn toggle(&mut self, item: CatalogItem) -> Toggled {
        let id = item.id.clone();
        let outcome = self.set.toggle(item);
        info!("Toggled {} in favorites: {:?}", id, outcome);
        self.persist();
        outcome
    }

    pub fn clear(&mut self) -> bool {
        let cleared = self.set.clear();
        if cleared {
            info!("Cleared favorites");
            self.persist();
        }
        cleared
    }

    pub fn contains(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.set.get(id)
    }

    pub fn items(&self) -> &[CatalogItem] {
        self.set.items()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    fn persist(&self) {
        if let Err(e) = self.write() {
            warn!("Failed to persist favorites: {}", e);
        }
    }

    fn write(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(self.set.items()).map_err(|e| StorageError::Encode {
            key: FAVORITES_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.storage.set(FAVORITES_KEY, &json)
    }
}
