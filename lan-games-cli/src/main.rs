//! lan-games CLI
//!
//! Command-line interface for syncing and browsing the LAN party games catalog.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;
use lan_games_sync::SyncSettings;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let settings = SyncSettings::load().with_overrides(cli.list_url, cli.database);

    let result = match cli.command {
        Commands::Sync => commands::sync::run_sync(&settings, cli.quiet),
        Commands::List { json } => commands::list::run_list(&settings, json),
        Commands::Show { id } => commands::list::run_show(&settings, id),
        Commands::Search { term } => commands::search::run_search(term.as_deref()),
        Commands::Parse => commands::parse::run_parse(&settings),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&settings);
                Ok(())
            }
            ConfigAction::Setup => commands::config::run_config_setup(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

/// Install the logger. Normal output goes through `log::info!`, so the
/// default format is the bare message; `-v` adds levels and targets.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if !verbose {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    } else {
        builder.format_timestamp_millis();
    }
    builder.init();
}

/// Log an empty line.
pub(crate) fn log_blank() {
    log::info!("");
}
