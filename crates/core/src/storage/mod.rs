//! Durable key-value storage.
//!
//! Favorites and recent queries each live under their own namespaced key as
//! a JSON document. Backends only move strings; encoding is the stores' job.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Key holding the serialized favorites set.
pub const FAVORITES_KEY: &str = "marquee.favorites";

/// Key holding the serialized recent-queries list.
pub const RECENT_QUERIES_KEY: &str = "marquee.recent_queries";

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to encode value for '{key}': {message}")]
    Encode { key: String, message: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Trait for key-value storage backends.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
