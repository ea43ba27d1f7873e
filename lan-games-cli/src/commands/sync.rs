use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lan_games_sync::{GamesService, SyncSettings, list_source_for};

use super::{igdb_lookups, log_games, open_catalog, runtime};
use crate::CliError;
use crate::spinner::SpinnerProgress;

/// Run the `sync` command: one reconciliation pass, then print the catalog.
pub(crate) fn run_sync(settings: &SyncSettings, quiet: bool) -> Result<(), CliError> {
    let conn = open_catalog(settings)?;
    let lookups = igdb_lookups()?;
    let source = list_source_for(reqwest::Client::new(), &settings.list_url);
    let service = GamesService::new(conn, source, lookups);

    let rt = runtime()?;
    let progress = SpinnerProgress::new(quiet);
    let result = rt.block_on(service.get_games_with_progress(&progress));
    progress.finish();
    let result = result?;

    let stats = &result.stats;
    if !stats.source_available {
        log::warn!(
            "{} Games list unavailable at {}; showing stored catalog",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            settings.list_url,
        );
    } else {
        log::info!(
            "{} {} listed, {} added ({} matched, {} unmatched), {} removed",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            stats.listed,
            stats.added.if_supports_color(Stdout, |t| t.bold()),
            stats.matched,
            stats.unmatched,
            stats.removed.if_supports_color(Stdout, |t| t.bold()),
        );
    }
    crate::log_blank();
    log_games(&result.games);

    Ok(())
}
