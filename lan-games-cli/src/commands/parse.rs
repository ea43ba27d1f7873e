use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lan_games_catalog::parse_list;
use lan_games_sync::{SyncSettings, list_source_for};

use super::{runtime, truncate_str};
use crate::CliError;

/// Run the `parse` command: fetch the list and print what it contains.
pub(crate) fn run_parse(settings: &SyncSettings) -> Result<(), CliError> {
    let source = list_source_for(reqwest::Client::new(), &settings.list_url);
    let rt = runtime()?;
    let text = rt.block_on(source.fetch())?;
    let stubs = parse_list(&text);

    log::info!(
        "{} entries in {}",
        stubs.len().if_supports_color(Stdout, |t| t.bold()),
        source.location().if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_blank();

    for stub in &stubs {
        let link = stub
            .links
            .steam
            .as_deref()
            .or(stub.links.website.as_deref())
            .unwrap_or("");
        log::info!(
            "  {:<5} {:<48} {:<4} {}",
            stub.category.map(|c| c.as_str()).unwrap_or(""),
            truncate_str(&stub.original_name, 48),
            if stub.is_free { "free" } else { "" },
            link.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
