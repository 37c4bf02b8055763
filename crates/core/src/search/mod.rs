//! Search state machine.
//!
//! `SearchMachine` owns the transient `SearchSession` and performs every
//! state transition synchronously. The catalog call happens between
//! [`SearchMachine::begin`] and [`SearchMachine::complete`], driven by the
//! application container. Each `begin` gets a sequence number; only the
//! latest one may complete, so a superseded or cleared request never
//! overwrites fresher state.

mod machine;
mod session;

pub use machine::{Completion, SearchMachine, SearchTicket};
pub use session::{SearchSession, SearchStatus};

use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Default minimum query length, in characters after trimming.
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Errors raised before a search is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Search terms must be at least {min} characters long (got {actual})")]
    QueryTooShort { min: usize, actual: usize },
}

/// How a query is sent to the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Free-text title search, paged.
    #[default]
    Title,
    /// The query is a catalog identifier, resolved by a single lookup.
    Identifier,
}

/// Category of a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    TooManyResults,
    Transport,
    Upstream,
}

impl FailureKind {
    /// Whether repeating the same search might succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, FailureKind::Transport | FailureKind::Upstream)
    }
}

/// A catalog failure as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SearchFailure {
    /// Translate a catalog error for the query that produced it.
    pub fn from_catalog(error: &CatalogError, query: &str) -> Self {
        let (kind, message) = match error {
            CatalogError::NotFound(_) => (
                FailureKind::NotFound,
                format!("Nothing found for \"{}\".", query),
            ),
            CatalogError::TooManyResults(_) => (
                FailureKind::TooManyResults,
                format!(
                    "\"{}\" matches too many titles. Try a more specific search.",
                    query
                ),
            ),
            CatalogError::Transport(_) => (
                FailureKind::Transport,
                "Could not reach the catalog. Check your connection and try again.".to_string(),
            ),
            CatalogError::NotConfigured(_) => (
                FailureKind::Upstream,
                "The catalog client is not configured. Set an API key and try again."
                    .to_string(),
            ),
            CatalogError::Upstream { .. } | CatalogError::Parse(_) => (
                FailureKind::Upstream,
                "The catalog returned an unexpected error. Please try again.".to_string(),
            ),
        };
        Self { kind, message }
    }
}
