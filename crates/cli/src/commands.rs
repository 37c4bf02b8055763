//! Subcommand handlers.

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use marquee_core::{App, Config, SanitizedConfig, SearchOutcome, SearchSession, Toggled};

use crate::output;

pub async fn search(app: &App, term: &str, page: u32, all: bool, json: bool) -> Result<()> {
    let mut session = match app.search(term, page).await? {
        SearchOutcome::Completed(session) => session,
        SearchOutcome::Skipped => bail!("Nothing to search for"),
        SearchOutcome::Superseded => return Ok(()),
    };

    if all {
        while session.has_more() {
            match app.load_more().await {
                SearchOutcome::Completed(next) => session = next,
                SearchOutcome::Skipped | SearchOutcome::Superseded => break,
            }
        }
    }

    print_session(app, &session, json);
    Ok(())
}

pub(crate) fn print_session(app: &App, session: &SearchSession, json: bool) {
    if json {
        println!("{}", output::format_json(session));
    } else {
        println!("{}", output::format_session(session, |id| app.is_favorite(id)));
    }
}

pub async fn show(app: &App, id: &str, json: bool) -> Result<()> {
    let item = app
        .details(id)
        .await
        .with_context(|| format!("Failed to look up {}", id))?;

    if json {
        println!("{}", output::format_json(&item));
    } else {
        println!("{}", output::format_details(&item));
        if app.is_favorite(&item.id) {
            println!("\n(in favorites)");
        }
    }
    Ok(())
}

pub fn list_favorites(app: &App, json: bool) -> Result<()> {
    let items = app.favorites();
    if json {
        println!("{}", output::format_json(&items));
    } else {
        println!("{}", output::format_favorites(&items));
    }
    Ok(())
}

pub async fn add_favorite(app: &App, id: &str) -> Result<()> {
    let added = app
        .add_favorite_by_id(id)
        .await
        .with_context(|| format!("Failed to look up {}", id))?;
    if added {
        println!("Added {} to favorites.", id.trim());
    } else {
        println!("{} is already a favorite.", id.trim());
    }
    Ok(())
}

pub async fn remove_favorite(app: &App, id: &str, yes: bool) -> Result<()> {
    let Some(item) = app.favorite(id.trim()) else {
        println!("{} is not a favorite.", id.trim());
        return Ok(());
    };

    let prompt = format!("Remove \"{}\" from favorites?", item.title);
    if !yes && !confirm(&prompt).await? {
        println!("Kept.");
        return Ok(());
    }

    app.remove_favorite(&item.id);
    println!("Removed {} from favorites.", item.id);
    Ok(())
}

pub async fn toggle_favorite(app: &App, id: &str) -> Result<()> {
    let id = id.trim();
    let item = match app.favorite(id) {
        Some(item) => item,
        None => app
            .details(id)
            .await
            .with_context(|| format!("Failed to look up {}", id))?,
    };

    match app.toggle_favorite(item) {
        Toggled::Added => println!("Added {} to favorites.", id),
        Toggled::Removed => println!("Removed {} from favorites.", id),
    }
    Ok(())
}

pub async fn clear_favorites(app: &App, yes: bool) -> Result<()> {
    let count = app.favorites().len();
    if count == 0 {
        println!("No favorites to clear.");
        return Ok(());
    }

    let prompt = format!("Remove all {} favorites?", count);
    if !yes && !confirm(&prompt).await? {
        println!("Kept.");
        return Ok(());
    }

    app.clear_favorites();
    println!("Cleared {} favorites.", count);
    Ok(())
}

pub fn list_recent(app: &App, json: bool) -> Result<()> {
    let terms = app.recent_queries();
    if json {
        println!("{}", output::format_json(&terms));
    } else if terms.is_empty() {
        println!("No recent searches.");
    } else {
        for term in terms {
            println!("{}", term);
        }
    }
    Ok(())
}

pub fn remove_recent(app: &App, term: &str) -> Result<()> {
    if app.remove_recent(term) {
        println!("Forgot \"{}\".", term.trim());
    } else {
        println!("\"{}\" is not a recent search.", term.trim());
    }
    Ok(())
}

pub fn clear_recent(app: &App) -> Result<()> {
    app.clear_recent();
    println!("Recent searches cleared.");
    Ok(())
}

pub fn stats(app: &App, json: bool) -> Result<()> {
    let stats = app.stats();
    if json {
        println!("{}", output::format_json(&stats));
    } else {
        println!("{}", output::format_stats(&stats));
    }
    Ok(())
}

pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", output::format_json(&SanitizedConfig::from(config)));
    Ok(())
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is a no.
async fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{} [y/N] ", prompt).as_bytes())
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read confirmation")?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
