//! Testing utilities and mock implementations.
//!
//! Mocks stand in for the catalog service and the durable store so the
//! search and favorites flows can be exercised without a network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use marquee_core::testing::{fixtures, MockCatalog};
//!
//! let catalog = MockCatalog::new();
//! catalog
//!     .set_page("inception", 1, vec![fixtures::movie("tt1375666", "Inception", "2010")], 1)
//!     .await;
//! ```

mod failing_store;
mod mock_catalog;

pub use failing_store::FailingStore;
pub use mock_catalog::{MockCatalog, RecordedQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{CatalogItem, ContentKind, ItemDetails, Rating};

    /// A summary-only catalog item of the given kind.
    pub fn item(id: &str, title: &str, year: &str, kind: ContentKind) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            poster_url: format!("https://img.example/{}.jpg", id),
            kind,
            details: None,
        }
    }

    /// A summary-only movie.
    pub fn movie(id: &str, title: &str, year: &str) -> CatalogItem {
        item(id, title, year, ContentKind::Movie)
    }

    /// A summary-only series.
    pub fn series(id: &str, title: &str, year: &str) -> CatalogItem {
        item(id, title, year, ContentKind::Series)
    }

    /// A movie with extended attributes, as a detail lookup returns it.
    pub fn detailed_movie(id: &str, title: &str, year: &str) -> CatalogItem {
        let mut movie = movie(id, title, year);
        movie.details = Some(ItemDetails {
            rated: Some("PG-13".to_string()),
            released: Some(format!("01 Jan {}", year)),
            runtime: Some("120 min".to_string()),
            genre: Some("Drama".to_string()),
            director: Some("Jane Director".to_string()),
            writer: Some("John Writer".to_string()),
            actors: Some("Actor One, Actor Two".to_string()),
            plot: Some(format!("The full story of {}.", title)),
            language: Some("English".to_string()),
            country: Some("United States".to_string()),
            awards: None,
            metascore: Some("70".to_string()),
            imdb_rating: Some("7.5".to_string()),
            imdb_votes: Some("10,000".to_string()),
            box_office: None,
            ratings: vec![
                Rating {
                    source: "Internet Movie Database".to_string(),
                    value: "7.5/10".to_string(),
                },
                Rating {
                    source: "Rotten Tomatoes".to_string(),
                    value: "80%".to_string(),
                },
            ],
        });
        movie
    }

    /// `count` movies with ids `tt{offset + n}`.
    pub fn movies(prefix: &str, offset: u32, count: u32) -> Vec<CatalogItem> {
        (offset..offset + count)
            .map(|n| movie(&format!("tt{:07}", n), &format!("{} {}", prefix, n), "2000"))
            .collect()
    }
}
