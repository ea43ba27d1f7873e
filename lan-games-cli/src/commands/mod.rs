pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod parse;
pub(crate) mod search;
pub(crate) mod sync;

use std::sync::Arc;

use lan_games_catalog::CanonicalGame;
use lan_games_db::Connection;
use lan_games_igdb::{Credentials, IgdbClient, IgdbError, LookupCache};
use lan_games_sync::SyncSettings;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn open_catalog(settings: &SyncSettings) -> Result<Connection, CliError> {
    lan_games_db::open_database(&settings.database).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database {}: {}",
            settings.database.display(),
            e
        ))
    })
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// IGDB client behind a fresh lookup cache, or a config error explaining
/// how to provide credentials.
pub(crate) fn igdb_lookups() -> Result<Arc<LookupCache<IgdbClient>>, CliError> {
    let creds = Credentials::load().map_err(|e| {
        let reason = match e {
            IgdbError::Config(msg) => msg,
            other => other.to_string(),
        };
        CliError::config(format!(
            "{}\n  Run 'lan-games config setup' to configure credentials.",
            reason
        ))
    })?;
    let client = IgdbClient::from_credentials(&creds)
        .map_err(|e| CliError::config(format!("Failed to create IGDB client: {}", e)))?;
    Ok(Arc::new(LookupCache::new(client)))
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Log games as an aligned table.
pub(crate) fn log_games(games: &[CanonicalGame]) {
    if games.is_empty() {
        log::info!(
            "{}",
            "No games in the catalog.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    for game in games {
        let id = game.id.map(|id| id.to_string()).unwrap_or_default();
        let year = game
            .release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());
        let free = if game.is_free { "free" } else { "" };
        let marker = if game.is_matched() {
            "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "?".if_supports_color(Stdout, |t| t.yellow()).to_string()
        };
        log::info!(
            "  {:>5} {} {:<48} {} {:<5} {}",
            id,
            marker,
            truncate_str(&game.display_name, 48),
            year.if_supports_color(Stdout, |t| t.dimmed()),
            game.category.map(|c| c.as_str()).unwrap_or(""),
            free.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate_str("Worms", 10), "Worms");
        assert_eq!(truncate_str("Keep Talking and Nobody Explodes", 12), "Keep Talk...");
    }
}
