//! The read and suggest operations served to clients.

use std::sync::Arc;

use lan_games_catalog::{CanonicalGame, CatalogRecord, GameStub, Suggestion, parse_list};
use lan_games_db::queries;
use lan_games_igdb::{CatalogApi, LookupCache};
use rusqlite::Connection;

use crate::error::SyncError;
use crate::progress::{SilentProgress, SyncProgress};
use crate::reconcile::{ReconcileResult, reconcile};
use crate::source::ListSource;

/// Bundles storage, the list source and the shared lookup cache.
///
/// Every [`get_games`](Self::get_games) call runs a full reconciliation
/// pass. Passes on separate services sharing one database are not
/// serialized against each other.
///
/// The async operations borrow the `rusqlite::Connection` across awaits, and
/// `Connection` is not `Sync`, so their futures are not `Send`. Drive them
/// with `Runtime::block_on` or on a `LocalSet`, not with `tokio::spawn`.
pub struct GamesService<A> {
    conn: Connection,
    source: Box<dyn ListSource>,
    lookups: Arc<LookupCache<A>>,
    suggestions: Vec<Suggestion>,
}

impl<A: CatalogApi> GamesService<A> {
    pub fn new(
        conn: Connection,
        source: Box<dyn ListSource>,
        lookups: Arc<LookupCache<A>>,
    ) -> Self {
        Self {
            conn,
            source,
            lookups,
            suggestions: Vec::new(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn lookups(&self) -> &LookupCache<A> {
        &self.lookups
    }

    /// Reconcile and return the sorted catalog.
    pub async fn get_games(&self) -> Result<ReconcileResult, SyncError> {
        self.get_games_with_progress(&SilentProgress).await
    }

    pub async fn get_games_with_progress(
        &self,
        progress: &dyn SyncProgress,
    ) -> Result<ReconcileResult, SyncError> {
        reconcile(&self.conn, self.source.as_ref(), &self.lookups, progress).await
    }

    /// Stored games, without reconciling.
    pub fn stored_games(&self) -> Result<Vec<CanonicalGame>, SyncError> {
        Ok(queries::all_games(&self.conn)?)
    }

    /// One stored game by id.
    pub fn get_game(&self, id: i64) -> Result<CanonicalGame, SyncError> {
        queries::find_game(&self.conn, id)?.ok_or(SyncError::NotFound { id })
    }

    /// Raw IGDB search through the shared cache. `None` browses primary
    /// games instead of searching.
    pub async fn get_games_from_igdb(&self, term: Option<&str>) -> Vec<CatalogRecord> {
        self.lookups.search_games(term).await
    }

    /// Fetch and parse the list without touching storage.
    pub async fn get_games_from_github(&self) -> Result<Vec<GameStub>, SyncError> {
        let text = self.source.fetch().await?;
        Ok(parse_list(&text))
    }

    /// Record a suggestion and return every suggestion made so far. Kept in
    /// memory only; repeated suggestions are kept as-is.
    pub fn suggest(&mut self, suggestion: Suggestion) -> Vec<Suggestion> {
        self.suggestions.push(suggestion);
        self.suggestions.clone()
    }
}
