//! Types for catalog items and search pages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder the catalog uses for any field it has no value for.
pub const NOT_AVAILABLE: &str = "N/A";

/// Category of a catalog entry.
///
/// The catalog only documents a handful of categories, anything else is kept
/// in `Other` as a trimmed, lower-case label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentKind {
    Movie,
    Series,
    Episode,
    Game,
    Other(String),
}

impl ContentKind {
    /// Label as the catalog spells it.
    pub fn as_str(&self) -> &str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
            ContentKind::Episode => "episode",
            ContentKind::Game => "game",
            ContentKind::Other(s) => s,
        }
    }
}

impl From<String> for ContentKind {
    fn from(s: String) -> Self {
        let label = s.trim().to_lowercase();
        match label.as_str() {
            "movie" => ContentKind::Movie,
            "series" => ContentKind::Series,
            "episode" => ContentKind::Episode,
            "game" => ContentKind::Game,
            _ => ContentKind::Other(label),
        }
    }
}

impl From<&str> for ContentKind {
    fn from(s: &str) -> Self {
        ContentKind::from(s.to_string())
    }
}

impl From<ContentKind> for String {
    fn from(kind: ContentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog record.
///
/// Search results only carry the summary fields; `details` is filled in by
/// a fetch-by-identifier lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Catalog-assigned identifier (e.g. `tt1375666`).
    pub id: String,
    pub title: String,
    /// Release year in the catalog's own formatting (`"2010"`, `"2011–2019"`).
    pub year: String,
    /// Poster URL, or the `"N/A"` sentinel.
    pub poster_url: String,
    pub kind: ContentKind,
    /// Extended attributes from a detail fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ItemDetails>,
}

impl CatalogItem {
    /// Poster URL, unless the catalog reported none.
    pub fn poster(&self) -> Option<&str> {
        let url = self.poster_url.trim();
        if url.is_empty() || url == NOT_AVAILABLE {
            None
        } else {
            Some(url)
        }
    }

    /// Whether the extended attributes have been fetched.
    pub fn has_details(&self) -> bool {
        self.details.is_some()
    }
}

/// Extended attributes returned by the full-plot detail lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    /// Runtime as reported (`"148 min"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    /// Comma-separated cast list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metascore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_votes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_office: Option<String>,
    /// Ratings from individual sources.
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

impl ItemDetails {
    /// Cast members, split out of the comma-separated list.
    pub fn cast(&self) -> Vec<&str> {
        self.actors
            .as_deref()
            .map(|a| a.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}

/// A rating from one source (e.g. "Rotten Tomatoes" / "87%").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// Items in catalog order.
    pub items: Vec<CatalogItem>,
    /// Total number of matches the catalog reports across all pages.
    pub total_count: u32,
}
