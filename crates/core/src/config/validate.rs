use super::{types::Config, ConfigError, StorageBackend};

/// Validate configuration
/// Currently validates:
/// - Catalog timeout is not 0
/// - Minimum query length is not 0
/// - SQLite storage has a path
///
/// A missing API key is not an error here: favorites and statistics work
/// offline, and the catalog client reports it when first used.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.search.min_query_len == 0 {
        return Err(ConfigError::ValidationError(
            "search.min_query_len cannot be 0".to_string(),
        ));
    }

    if config.storage.backend == StorageBackend::Sqlite
        && config.storage.path.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "storage.path is required for the sqlite backend".to_string(),
        ));
    }

    Ok(())
}
