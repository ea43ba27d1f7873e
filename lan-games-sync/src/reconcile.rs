//! Reconcile the games list against the persisted catalog.
//!
//! A pass diffs the list against storage by original name, resolves and
//! merges every new entry, deletes games that left the list, and returns
//! the catalog sorted for display. Games already stored are never
//! re-resolved, so IGDB-side changes to them are not picked up.
//!
//! The database is only touched on the calling task; IGDB searches for the
//! new entries are dispatched together and joined in input order. The
//! connection is borrowed across those awaits, so the pass future is not
//! `Send`.

use std::collections::HashSet;

use futures::future::join_all;
use lan_games_catalog::{CanonicalGame, GameStub, parse_list};
use lan_games_db::{operations, queries};
use lan_games_igdb::{CatalogApi, LookupCache};
use rusqlite::Connection;

use crate::error::SyncError;
use crate::merge::merge;
use crate::progress::SyncProgress;
use crate::resolve::{Resolution, pick_best_match};
use crate::source::ListSource;

/// Statistics from a reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Whether the list document could be fetched.
    pub source_available: bool,
    /// Entries parsed from the list.
    pub listed: usize,
    pub added: usize,
    pub removed: usize,
    /// New games resolved to an IGDB record.
    pub matched: usize,
    /// New games stored from the list alone.
    pub unmatched: usize,
    /// IGDB searches dispatched (cache hits included).
    pub searches: usize,
}

impl ReconcileStats {
    pub fn wrote(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// The catalog after a pass, plus what the pass did.
#[derive(Debug, Clone)]
pub struct ReconcileResult {
    pub games: Vec<CanonicalGame>,
    pub stats: ReconcileStats,
}

/// Run one reconciliation pass and return the sorted catalog.
///
/// An unavailable list leaves storage untouched and returns what is stored.
/// Failed IGDB calls degrade to unmatched games. Only storage failures are
/// returned as errors.
pub async fn reconcile<A: CatalogApi>(
    conn: &Connection,
    source: &dyn ListSource,
    lookups: &LookupCache<A>,
    progress: &dyn SyncProgress,
) -> Result<ReconcileResult, SyncError> {
    let mut stats = ReconcileStats::default();
    let persisted = queries::all_games(conn)?;

    progress.on_phase(&format!("Fetching games list from {}", source.location()));
    let text = match source.fetch().await {
        Ok(text) => text,
        Err(e) => {
            log::info!("Serving {} stored games: {}", persisted.len(), e);
            progress.on_complete("Games list unavailable; showing stored games");
            return Ok(ReconcileResult {
                games: persisted,
                stats,
            });
        }
    };
    stats.source_available = true;

    let stubs = parse_list(&text);
    stats.listed = stubs.len();

    let (new_stubs, removed) = diff(&persisted, &stubs);

    if !new_stubs.is_empty() {
        let added = resolve_new_games(&new_stubs, lookups, progress, &mut stats).await;
        operations::save_games(conn, &added)?;
        stats.added = added.len();
    }

    if !removed.is_empty() {
        progress.on_phase(&format!("Removing {} games no longer listed", removed.len()));
        for game in &removed {
            log::debug!("Removing '{}'", game.original_name);
        }
        operations::remove_games(conn, &removed)?;
        stats.removed = removed.len();
    }

    let games = if stats.wrote() {
        queries::all_games(conn)?
    } else {
        persisted
    };

    let summary = format!(
        "{} games listed: {} added ({} matched, {} unmatched), {} removed",
        stats.listed, stats.added, stats.matched, stats.unmatched, stats.removed
    );
    log::info!("{}", summary);
    progress.on_complete(&summary);

    Ok(ReconcileResult { games, stats })
}

/// Split the list into entries not yet stored and stored games no longer
/// listed. A name listed twice is only added once.
fn diff(persisted: &[CanonicalGame], stubs: &[GameStub]) -> (Vec<GameStub>, Vec<CanonicalGame>) {
    let stored: HashSet<&str> = persisted.iter().map(|g| g.original_name.as_str()).collect();
    let listed: HashSet<&str> = stubs.iter().map(|s| s.original_name.as_str()).collect();

    let mut seen = HashSet::new();
    let mut new_stubs = Vec::new();
    for stub in stubs {
        if stored.contains(stub.original_name.as_str()) {
            continue;
        }
        if !seen.insert(stub.original_name.as_str()) {
            log::debug!("Ignoring duplicate list entry '{}'", stub.original_name);
            continue;
        }
        new_stubs.push(stub.clone());
    }

    let removed = persisted
        .iter()
        .filter(|g| !listed.contains(g.original_name.as_str()))
        .cloned()
        .collect();

    (new_stubs, removed)
}

async fn resolve_new_games<A: CatalogApi>(
    new_stubs: &[GameStub],
    lookups: &LookupCache<A>,
    progress: &dyn SyncProgress,
    stats: &mut ReconcileStats,
) -> Vec<CanonicalGame> {
    progress.on_phase(&format!("Searching IGDB for {} new games", new_stubs.len()));

    let genres = lookups.genre_vocabulary().await;
    let searches = new_stubs
        .iter()
        .map(|stub| lookups.search_games(Some(stub.original_name.as_str())));
    let candidates = join_all(searches).await;
    stats.searches = new_stubs.len();

    let resolutions: Vec<Resolution> = new_stubs
        .iter()
        .zip(candidates)
        .map(|(stub, found)| pick_best_match(found, stub))
        .collect();

    let matched_ids: Vec<i64> = resolutions.iter().filter_map(Resolution::external_id).collect();
    let covers = lookups.covers(&matched_ids).await;

    let total = new_stubs.len();
    new_stubs
        .iter()
        .zip(&resolutions)
        .enumerate()
        .map(|(i, (stub, resolution))| {
            match resolution {
                Resolution::Matched(record) => {
                    stats.matched += 1;
                    log::debug!("'{}' matched IGDB #{}", stub.original_name, record.external_id);
                }
                Resolution::Unmatched => {
                    stats.unmatched += 1;
                    log::debug!("'{}' has no IGDB match", stub.original_name);
                }
            }
            progress.on_game(i + 1, total, &stub.original_name);
            merge(stub, resolution, &genres, &covers)
        })
        .collect()
}
