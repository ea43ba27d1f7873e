use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lan_games_sync::release_year;

use super::{igdb_lookups, runtime, truncate_str};
use crate::CliError;

/// Run the `search` command against IGDB, bypassing the catalog.
pub(crate) fn run_search(term: Option<&str>) -> Result<(), CliError> {
    let lookups = igdb_lookups()?;
    let rt = runtime()?;
    let records = rt.block_on(lookups.search_games(term));

    if records.is_empty() {
        log::info!(
            "{}",
            "No IGDB results (or IGDB unavailable).".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    for record in &records {
        let year = record
            .first_release_date
            .and_then(release_year)
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());
        log::info!(
            "  {:>7} {:<52} {} {}",
            record.external_id,
            truncate_str(&record.name, 52),
            year.if_supports_color(Stdout, |t| t.dimmed()),
            record.url.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}
