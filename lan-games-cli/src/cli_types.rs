//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lan-games")]
#[command(about = "Keep a catalog of LAN party games in sync with IGDB", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog database path (overrides LAN_GAMES_DATABASE and the config file)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Games list URL or local file (overrides LAN_GAMES_LIST_URL and the config file)
    #[arg(long, global = true)]
    pub list_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Reconcile the catalog with the games list and print it
    Sync,

    /// Print the stored catalog without syncing
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one stored game
    Show {
        /// Catalog id of the game
        id: i64,
    },

    /// Search IGDB directly (lists primary games when no term is given)
    Search {
        term: Option<String>,
    },

    /// Fetch and parse the games list without touching the catalog
    Parse,

    /// Manage IGDB credentials and sync settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Interactively set up credentials and settings
    Setup,

    /// Print the config file path
    Path,
}
