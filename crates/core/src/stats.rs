//! Aggregate statistics over the favorites set.
//!
//! Everything here is a pure projection of a favorites snapshot and is
//! recomputed on every read.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{CatalogItem, ContentKind};

/// Number of distinct years kept by [`count_by_year`].
pub const MAX_YEARS: usize = 10;

/// Favorites statistics for the statistics view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritesStats {
    pub total: usize,
    pub by_year: Vec<(String, usize)>,
    pub by_kind: Vec<(ContentKind, usize)>,
}

/// Compute every statistic at once.
pub fn summarize(items: &[CatalogItem]) -> FavoritesStats {
    FavoritesStats {
        total: items.len(),
        by_year: count_by_year(items),
        by_kind: count_by_kind(items),
    }
}

/// Count items per `year`, most recent year first, keeping the ten most
/// recent distinct years.
///
/// Years are grouped after trimming. Values that are not plain integers
/// (`"2011–2019"`, `"N/A"`) keep their literal value and sort after every
/// numeric year, alphabetically.
pub fn count_by_year(items: &[CatalogItem]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.year.trim()).or_default() += 1;
    }

    let mut years: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(year, count)| (year.to_string(), count))
        .collect();
    years.sort_by(|(a, _), (b, _)| compare_years(a, b));
    years.truncate(MAX_YEARS);
    years
}

/// Count items per kind, most common first. Ties are ordered by label.
pub fn count_by_kind(items: &[CatalogItem]) -> Vec<(ContentKind, usize)> {
    let mut counts: HashMap<&ContentKind, usize> = HashMap::new();
    for item in items {
        *counts.entry(&item.kind).or_default() += 1;
    }

    let mut kinds: Vec<(ContentKind, usize)> = counts
        .into_iter()
        .map(|(kind, count)| (kind.clone(), count))
        .collect();
    kinds.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.as_str().cmp(kb.as_str())));
    kinds
}

fn compare_years(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => y.cmp(&x).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    fn with_years(years: &[&str]) -> Vec<CatalogItem> {
        years
            .iter()
            .enumerate()
            .map(|(i, y)| fixtures::movie(&format!("tt{:07}", i), "Title", y))
            .collect()
    }

    #[test]
    fn test_count_by_year_empty() {
        assert!(count_by_year(&[]).is_empty());
    }

    #[test]
    fn test_count_by_year_groups_and_sorts_descending() {
        let items = with_years(&["2012", "2012", "2011"]);
        assert_eq!(
            count_by_year(&items),
            vec![("2012".to_string(), 2), ("2011".to_string(), 1)]
        );
    }

    #[test]
    fn test_count_by_year_truncates_by_recency_not_count() {
        let mut years: Vec<String> = (2000..2015).map(|y| y.to_string()).collect();
        // 2000 is by far the most common but also the oldest.
        for _ in 0..5 {
            years.push("2000".to_string());
        }
        let refs: Vec<&str> = years.iter().map(String::as_str).collect();
        let counts = count_by_year(&with_years(&refs));

        assert_eq!(counts.len(), MAX_YEARS);
        assert_eq!(counts[0].0, "2014");
        assert_eq!(counts[9].0, "2005");
        assert!(counts.iter().all(|(y, _)| y != "2000"));
    }

    #[test]
    fn test_count_by_year_unparseable_sorts_last() {
        let items = with_years(&["N/A", "2008–2013", "1999", "2010", "N/A"]);
        assert_eq!(
            count_by_year(&items),
            vec![
                ("2010".to_string(), 1),
                ("1999".to_string(), 1),
                ("2008–2013".to_string(), 1),
                ("N/A".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_count_by_year_ignores_surrounding_whitespace() {
        let items = with_years(&["2012", " 2012", "2012 ", "N/A", " N/A"]);
        assert_eq!(
            count_by_year(&items),
            vec![("2012".to_string(), 3), ("N/A".to_string(), 2)]
        );
    }

    #[test]
    fn test_count_by_kind_folds_other_labels() {
        let items = vec![
            fixtures::item("tt1", "A", "2001", ContentKind::from("Documentary")),
            fixtures::item("tt2", "B", "2002", ContentKind::from("documentary")),
            fixtures::movie("tt3", "C", "2003"),
        ];
        assert_eq!(
            count_by_kind(&items),
            vec![
                (ContentKind::Other("documentary".to_string()), 2),
                (ContentKind::Movie, 1),
            ]
        );
    }

    #[test]
    fn test_count_by_kind_sorted_by_count() {
        let items = vec![
            fixtures::movie("tt1", "A", "2001"),
            fixtures::series("tt2", "B", "2002"),
            fixtures::movie("tt3", "C", "2003"),
            fixtures::item("tt4", "D", "2004", ContentKind::Episode),
            fixtures::series("tt5", "E", "2005"),
            fixtures::movie("tt6", "F", "2006"),
        ];

        assert_eq!(
            count_by_kind(&items),
            vec![
                (ContentKind::Movie, 3),
                (ContentKind::Series, 2),
                (ContentKind::Episode, 1),
            ]
        );
    }

    #[test]
    fn test_count_by_kind_ties_by_label() {
        let items = vec![
            fixtures::series("tt1", "A", "2001"),
            fixtures::item("tt2", "B", "2002", ContentKind::Game),
            fixtures::item("tt3", "C", "2003", ContentKind::Episode),
        ];
        let kinds: Vec<_> = count_by_kind(&items).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![ContentKind::Episode, ContentKind::Game, ContentKind::Series]
        );
    }

    #[test]
    fn test_summarize() {
        let items = with_years(&["2012", "2011"]);
        let stats = summarize(&items);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_year.len(), 2);
        assert_eq!(stats.by_kind, vec![(ContentKind::Movie, 2)]);
    }
}
