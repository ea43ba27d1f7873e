use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lan_games_sync::SyncSettings;

use super::{log_games, open_catalog};
use crate::CliError;

/// Run the `list` command.
pub(crate) fn run_list(settings: &SyncSettings, json: bool) -> Result<(), CliError> {
    let conn = open_catalog(settings)?;
    let games = lan_games_db::all_games(&conn)
        .map_err(|e| CliError::database(format!("Failed to read catalog: {}", e)))?;

    if json {
        let out = serde_json::to_string_pretty(&games)
            .map_err(|e| CliError::database(format!("Failed to encode catalog: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    log::info!(
        "{} ({} games)",
        "Catalog".if_supports_color(Stdout, |t| t.bold()),
        games.len(),
    );
    log::info!("  Database: {}", settings.database.display());
    crate::log_blank();
    log_games(&games);
    Ok(())
}

/// Run the `show` command.
pub(crate) fn run_show(settings: &SyncSettings, id: i64) -> Result<(), CliError> {
    let conn = open_catalog(settings)?;
    let game = lan_games_db::find_game(&conn, id)
        .map_err(|e| CliError::database(format!("Failed to read catalog: {}", e)))?
        .ok_or(CliError::NotFound(id))?;

    let label = |name: &str| format!("{:<13}", format!("{}:", name));
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    log::info!(
        "{}",
        game.display_name.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  {} {}", label("List name"), game.original_name);
    log::info!(
        "  {} {}",
        label("IGDB id"),
        or_dash(game.external_id.map(|v| v.to_string()))
    );
    log::info!(
        "  {} {}",
        label("Released"),
        or_dash(game.release_year.map(|v| v.to_string()))
    );
    log::info!(
        "  {} {}",
        label("Rating"),
        or_dash(game.rating.map(|v| format!("{:.1}", v)))
    );
    log::info!(
        "  {} {}",
        label("Genres"),
        if game.genres.is_empty() {
            "-".to_string()
        } else {
            game.genres.join(", ")
        }
    );
    log::info!(
        "  {} {}",
        label("Category"),
        or_dash(game.category.map(|c| c.to_string()))
    );
    log::info!("  {} {}", label("Free"), if game.is_free { "yes" } else { "no" });
    log::info!("  {} {}", label("Cover"), or_dash(game.cover_url.clone()));

    let links = [
        ("Website", &game.links.website),
        ("Steam", &game.links.steam),
        ("IGDB", &game.links.igdb),
    ];
    for (name, link) in links {
        if let Some(url) = link {
            log::info!(
                "  {} {}",
                label(name),
                url.if_supports_color(Stdout, |t| t.cyan())
            );
        }
    }

    if let Some(summary) = &game.summary {
        crate::log_blank();
        log::info!("  {}", summary);
    }

    Ok(())
}
