//! Movie catalog search with persisted favorites.
//!
//! The crate is organized around an explicit application container,
//! [`App`], which owns the search state machine, the favorites store and the
//! recent-queries log, and talks to the catalog through [`CatalogClient`].

pub mod app;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod input;
pub mod recent;
pub mod search;
pub mod stats;
pub mod storage;
pub mod testing;

pub use app::{App, SearchOutcome};
pub use catalog::{
    is_catalog_id, CatalogClient, CatalogError, CatalogItem, ContentKind, ItemDetails,
    OmdbClient, OmdbConfig, Rating, SearchPage, UnavailableCatalog,
};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, SanitizedConfig, SearchConfig, StorageBackend, StorageConfig,
};
pub use favorites::{FavoritesSet, FavoritesStore, Toggled};
pub use input::{Debouncer, DEFAULT_DEBOUNCE};
pub use recent::{RecentQueries, RecentQueriesLog, MAX_RECENT_QUERIES};
pub use search::{
    FailureKind, SearchError, SearchFailure, SearchMachine, SearchMode, SearchSession,
    SearchStatus,
};
pub use stats::{count_by_kind, count_by_year, summarize, FavoritesStats};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
