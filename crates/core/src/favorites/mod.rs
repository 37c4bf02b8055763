//! Favorites: the user's saved catalog items.
//!
//! `FavoritesSet` is the pure collection. `FavoritesStore` wraps it and writes
//! the full set to durable storage after every accepted mutation.

mod store;

pub use store::FavoritesStore;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggled {
    Added,
    Removed,
}

/// Insertion-ordered collection of catalog items, unique by `id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesSet {
    items: Vec<CatalogItem>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list, keeping the first occurrence of each `id`.
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let mut set = Self::new();
        for item in items {
            set.add(item);
        }
        set
    }

    /// Append `item` unless an entry with the same `id` exists.
    pub fn add(&mut self, item: CatalogItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the entry with `id`, if any.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    pub fn toggle(&mut self, item: CatalogItem) -> Toggled {
        if self.remove(&item.id) {
            Toggled::Removed
        } else {
            self.items.push(item);
            Toggled::Added
        }
    }

    /// Empty the set. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
