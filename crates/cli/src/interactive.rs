//! Line-based search box.
//!
//! Plain lines are search input and go through the debouncer; lines starting
//! with `:` are intents that run immediately.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use marquee_core::{App, Debouncer, SearchError, SearchOutcome, Toggled};

use crate::commands::print_session;

const HELP: &str = "Type a title or a tt identifier to search.
  :more      load the next page
  :retry     repeat the last search
  :clear     clear the results
  :fav <n>   toggle result n in favorites
  :help      show this help
  :quit      exit";

#[derive(Debug, PartialEq, Eq)]
enum Intent {
    Query(String),
    More,
    Retry,
    Clear,
    Favorite(usize),
    Help,
    Quit,
    Invalid(String),
}

impl Intent {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Intent::Query(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("more"), None) => Intent::More,
            (Some("retry"), None) => Intent::Retry,
            (Some("clear"), None) => Intent::Clear,
            (Some("help"), None) => Intent::Help,
            (Some("quit") | Some("q"), None) => Intent::Quit,
            (Some("fav"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Intent::Favorite(n),
                _ => Intent::Invalid(format!("Not a result number: {}", n)),
            },
            _ => Intent::Invalid(format!("Unknown command: {}", line)),
        }
    }
}

pub async fn run(app: Arc<App>, debounce: Duration) -> Result<()> {
    println!("{}", HELP);
    drive(app, debounce, BufReader::new(tokio::io::stdin())).await
}

/// Process input lines until `:quit` or end of input.
///
/// End of input flushes a pending query and waits for running searches;
/// `:quit` drops both.
async fn drive<R>(app: Arc<App>, debounce: Duration, reader: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let (debouncer, mut settled, timer) = Debouncer::spawn(debounce);
    let mut input = Some(debouncer);
    let mut lines = reader.lines();
    let mut searches = JoinSet::new();
    let mut quit = false;

    loop {
        tokio::select! {
            line = lines.next_line(), if input.is_some() => {
                let Some(line) = line? else {
                    // EOF: dropping the debouncer flushes any pending input.
                    input = None;
                    continue;
                };
                match Intent::parse(&line) {
                    Intent::Query(text) => {
                        if let Some(debouncer) = &input {
                            debouncer.push(text);
                        }
                    }
                    Intent::More => {
                        let app = Arc::clone(&app);
                        searches.spawn(async move {
                            match app.load_more().await {
                                SearchOutcome::Completed(session) => print_session(&app, &session, false),
                                SearchOutcome::Skipped => println!("No more results."),
                                SearchOutcome::Superseded => {}
                            }
                        });
                    }
                    Intent::Retry => {
                        let query = app.session().query().to_string();
                        if query.is_empty() {
                            println!("Nothing to retry.");
                        } else {
                            let app = Arc::clone(&app);
                            searches.spawn(async move { run_search(&app, &query).await });
                        }
                    }
                    Intent::Clear => {
                        app.clear_search();
                        println!("Cleared.");
                    }
                    Intent::Favorite(n) => toggle_result(&app, n),
                    Intent::Help => println!("{}", HELP),
                    Intent::Quit => {
                        quit = true;
                        break;
                    }
                    Intent::Invalid(message) => println!("{}", message),
                }
            }
            query = settled.recv() => {
                let Some(query) = query else { break };
                let app = Arc::clone(&app);
                searches.spawn(async move { run_search(&app, &query).await });
            }
            Some(joined) = searches.join_next(), if !searches.is_empty() => {
                if let Err(e) = joined {
                    warn!("Search task failed: {}", e);
                }
            }
        }
    }

    if quit {
        timer.abort();
        searches.shutdown().await;
        return Ok(());
    }

    timer.await?;
    while let Some(joined) = searches.join_next().await {
        if let Err(e) = joined {
            warn!("Search task failed: {}", e);
        }
    }
    Ok(())
}

async fn run_search(app: &App, query: &str) {
    match app.search(query, 1).await {
        Ok(SearchOutcome::Completed(session)) => print_session(app, &session, false),
        Ok(SearchOutcome::Skipped) => {}
        Ok(SearchOutcome::Superseded) => debug!("Search for '{}' superseded", query),
        Err(SearchError::QueryTooShort { min, .. }) => {
            println!("Type at least {} characters to search.", min)
        }
    }
}

fn toggle_result(app: &App, n: usize) {
    let session = app.session();
    let Some(item) = session.items().get(n - 1).cloned() else {
        println!("No result number {}.", n);
        return;
    };

    let title = item.title.clone();
    match app.toggle_favorite(item) {
        Toggled::Added => println!("Added \"{}\" to favorites.", title),
        Toggled::Removed => println!("Removed \"{}\" from favorites.", title),
    }
}
