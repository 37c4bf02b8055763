//! Marquee CLI - search a movie catalog and keep a list of favorites.
//!
//! # Usage
//!
//! ```bash
//! marquee search "star wars" --all
//! marquee show tt0076759
//! marquee fav add tt0076759
//! marquee stats --json
//! marquee interactive
//! ```

mod commands;
mod interactive;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marquee_core::{load_config_or_default, validate_config, App};

/// Search a movie catalog and manage favorites.
#[derive(Parser)]
#[command(name = "marquee", version, about)]
struct Cli {
    /// Config file (default: $MARQUEE_CONFIG or marquee.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search by title, or look up a `tt` identifier
    Search {
        term: String,
        /// Page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Keep loading pages until every match is listed
        #[arg(long)]
        all: bool,
    },
    /// Show full details for one title
    Show { id: String },
    /// Manage favorites
    #[command(subcommand)]
    Fav(FavCommand),
    /// Manage recent search terms
    #[command(subcommand)]
    Recent(RecentCommand),
    /// Favorites statistics
    Stats,
    /// Print the effective configuration (API key redacted)
    Config,
    /// Line-based search box
    Interactive,
}

#[derive(Subcommand)]
enum FavCommand {
    /// List favorites in the order they were added
    List,
    /// Add a title by identifier
    Add { id: String },
    /// Remove a title
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Add the title if absent, remove it otherwise
    Toggle { id: String },
    /// Remove every favorite
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RecentCommand {
    List,
    Remove { term: String },
    Clear,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("MARQUEE_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("marquee.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    if let Command::Config = cli.command {
        return commands::show_config(&config);
    }

    let app = Arc::new(App::from_config(&config).context("Failed to open storage")?);
    let json = cli.json;

    match cli.command {
        Command::Search { term, page, all } => commands::search(&app, &term, page, all, json).await,
        Command::Show { id } => commands::show(&app, &id, json).await,
        Command::Fav(cmd) => match cmd {
            FavCommand::List => commands::list_favorites(&app, json),
            FavCommand::Add { id } => commands::add_favorite(&app, &id).await,
            FavCommand::Remove { id, yes } => commands::remove_favorite(&app, &id, yes).await,
            FavCommand::Toggle { id } => commands::toggle_favorite(&app, &id).await,
            FavCommand::Clear { yes } => commands::clear_favorites(&app, yes).await,
        },
        Command::Recent(cmd) => match cmd {
            RecentCommand::List => commands::list_recent(&app, json),
            RecentCommand::Remove { term } => commands::remove_recent(&app, &term),
            RecentCommand::Clear => commands::clear_recent(&app),
        },
        Command::Stats => commands::stats(&app, json),
        Command::Interactive => {
            let debounce = Duration::from_millis(config.search.debounce_ms);
            interactive::run(app, debounce).await
        }
        Command::Config => unreachable!("handled before storage is opened"),
    }
}
