//! Catalog lookup service integration.
//!
//! The catalog is an OMDb-style HTTP JSON endpoint answering two query
//! shapes: search by title term (paged) and fetch by identifier. Clients
//! never retry and never touch application state; callers decide what a
//! failure means.

mod omdb;
mod types;

pub use omdb::{OmdbClient, OmdbConfig, DEFAULT_BASE_URL};
pub use types::*;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;

static CATALOG_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^tt\d{7,}$").expect("valid catalog id pattern"));

/// Whether `query` looks like a catalog identifier (`tt` followed by digits).
pub fn is_catalog_id(query: &str) -> bool {
    CATALOG_ID.is_match(query.trim())
}

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog reported no match for the term or identifier.
    #[error("Nothing found: {0}")]
    NotFound(String),

    /// The query matched too broadly for the catalog to answer.
    #[error("Too many results: {0}")]
    TooManyResults(String),

    /// Network failure or timeout.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any other non-success answer.
    #[error("Catalog error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Upstream { status: Option<u16>, message: String },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for catalog clients.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search by title term. `page` is 1-based.
    async fn search_by_term(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError>;

    /// Fetch one item with its extended attributes.
    async fn fetch_by_id(&self, id: &str) -> Result<CatalogItem, CatalogError>;
}

/// Stand-in used when no real client could be built.
///
/// Every call fails with [`CatalogError::NotConfigured`], so offline features
/// keep working while searches surface the configuration problem.
pub struct UnavailableCatalog {
    reason: String,
}

impl UnavailableCatalog {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CatalogClient for UnavailableCatalog {
    async fn search_by_term(&self, _term: &str, _page: u32) -> Result<SearchPage, CatalogError> {
        Err(CatalogError::NotConfigured(self.reason.clone()))
    }

    async fn fetch_by_id(&self, _id: &str) -> Result<CatalogItem, CatalogError> {
        Err(CatalogError::NotConfigured(self.reason.clone()))
    }
}
