//! Output formatting.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use marquee_core::{CatalogItem, FavoritesStats, SearchSession, SearchStatus};
use serde::Serialize;

/// Formats any serializable value as pretty JSON.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// One numbered result line: `  3. Heat (1995) [movie] tt0113277`.
pub fn format_item_line(index: usize, item: &CatalogItem, favorite: bool) -> String {
    format!(
        "{:>3}. {}{} ({}) [{}] {}",
        index,
        if favorite { "* " } else { "" },
        item.title,
        item.year,
        item.kind,
        item.id
    )
}

/// Formats a search session for the terminal.
pub fn format_session(session: &SearchSession, is_favorite: impl Fn(&str) -> bool) -> String {
    match session.status() {
        SearchStatus::Idle => return "No search yet.".to_string(),
        SearchStatus::Searching => return format!("Searching for \"{}\"...", session.query()),
        SearchStatus::Empty | SearchStatus::Errored => {
            return session
                .error()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| format!("Nothing found for \"{}\".", session.query()));
        }
        SearchStatus::Populated => {}
    }

    let mut out = format!(
        "Showing {} of {} results for \"{}\"\n",
        session.items().len(),
        session.total_count(),
        session.query()
    );
    for (i, item) in session.items().iter().enumerate() {
        out.push_str(&format_item_line(i + 1, item, is_favorite(&item.id)));
        out.push('\n');
    }
    if session.has_more() {
        out.push_str("More results available.\n");
    }
    out.trim_end().to_string()
}

/// Formats the full detail view of one title.
pub fn format_details(item: &CatalogItem) -> String {
    let mut out = format!("{} ({})\n", item.title, item.year);
    out.push_str(&format!("  Id:       {}\n", item.id));
    out.push_str(&format!("  Kind:     {}\n", item.kind));
    if let Some(poster) = item.poster() {
        out.push_str(&format!("  Poster:   {}\n", poster));
    }

    if let Some(details) = &item.details {
        let fields = [
            ("Rated", &details.rated),
            ("Released", &details.released),
            ("Runtime", &details.runtime),
            ("Genre", &details.genre),
            ("Director", &details.director),
            ("Writer", &details.writer),
            ("Language", &details.language),
            ("Country", &details.country),
            ("Awards", &details.awards),
            ("Box office", &details.box_office),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                out.push_str(&format!("  {:<9} {}\n", format!("{}:", label), value));
            }
        }

        let cast = details.cast();
        if !cast.is_empty() {
            out.push_str(&format!("  Cast:     {}\n", cast.join(", ")));
        }
        if !details.ratings.is_empty() {
            out.push_str("  Ratings:\n");
            for rating in &details.ratings {
                out.push_str(&format!("    {}: {}\n", rating.source, rating.value));
            }
        }
        if let Some(plot) = &details.plot {
            out.push_str(&format!("\n{}\n", plot));
        }
    }

    out.trim_end().to_string()
}

/// Formats the favorites list.
pub fn format_favorites(items: &[CatalogItem]) -> String {
    if items.is_empty() {
        return "No favorites yet.".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format_item_line(i + 1, item, false))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the statistics view.
pub fn format_stats(stats: &FavoritesStats) -> String {
    if stats.total == 0 {
        return "No favorites yet.".to_string();
    }

    let mut out = format!("Favorites: {}\n\nBy year:\n", stats.total);
    for (year, count) in &stats.by_year {
        out.push_str(&format!("  {:<10} {}\n", year, count));
    }
    out.push_str("\nBy kind:\n");
    for (kind, count) in &stats.by_kind {
        out.push_str(&format!("  {:<10} {}\n", kind.as_str(), count));
    }
    out.trim_end().to_string()
}
