//! Memoized access to the catalog API.
//!
//! [`LookupCache`] is built once per process and shared by every
//! reconciliation pass. Name searches are cached per exact term, the genre
//! vocabulary is fetched at most once (barring a concurrent first call) and
//! never invalidated. Covers are always fetched fresh. Remote failures are
//! logged and turned into empty results, which are not cached.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lan_games_catalog::{CatalogRecord, CoverRecord, GenreVocabulary};
use tokio::sync::Mutex;

use crate::client::IgdbClient;
use crate::error::IgdbError;

/// The remote game metadata operations the lookup cache builds on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Name search, or browse primary games when `term` is `None`.
    async fn search_games(&self, term: Option<&str>) -> Result<Vec<CatalogRecord>, IgdbError>;

    async fn genres(&self) -> Result<GenreVocabulary, IgdbError>;

    async fn covers(&self, game_ids: &[i64]) -> Result<Vec<CoverRecord>, IgdbError>;
}

#[async_trait]
impl CatalogApi for IgdbClient {
    async fn search_games(&self, term: Option<&str>) -> Result<Vec<CatalogRecord>, IgdbError> {
        let games = self.fetch_games(term).await?;
        Ok(games.into_iter().map(CatalogRecord::from).collect())
    }

    async fn genres(&self) -> Result<GenreVocabulary, IgdbError> {
        let genres = self.fetch_genres().await?;
        Ok(genres.into_iter().map(|g| (g.id, g.name)).collect())
    }

    async fn covers(&self, game_ids: &[i64]) -> Result<Vec<CoverRecord>, IgdbError> {
        let covers = self.fetch_covers(game_ids).await?;
        Ok(covers.into_iter().map(CoverRecord::from).collect())
    }
}

#[async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    async fn search_games(&self, term: Option<&str>) -> Result<Vec<CatalogRecord>, IgdbError> {
        (**self).search_games(term).await
    }

    async fn genres(&self) -> Result<GenreVocabulary, IgdbError> {
        (**self).genres().await
    }

    async fn covers(&self, game_ids: &[i64]) -> Result<Vec<CoverRecord>, IgdbError> {
        (**self).covers(game_ids).await
    }
}

/// Process-wide cache in front of a [`CatalogApi`].
pub struct LookupCache<A> {
    api: A,
    searches: Mutex<HashMap<String, Vec<CatalogRecord>>>,
    genres: Mutex<Option<Arc<GenreVocabulary>>>,
}

impl<A: CatalogApi> LookupCache<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            searches: Mutex::new(HashMap::new()),
            genres: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Search by name. A term seen before in this process is answered from
    /// the cache (exact, case-sensitive key). Browse mode is never cached.
    pub async fn search_games(&self, term: Option<&str>) -> Vec<CatalogRecord> {
        if let Some(term) = term {
            if let Some(hit) = self.searches.lock().await.get(term) {
                return hit.clone();
            }
        }

        match self.api.search_games(term).await {
            Ok(records) => {
                if let Some(term) = term {
                    self.searches
                        .lock()
                        .await
                        .insert(term.to_string(), records.clone());
                }
                records
            }
            Err(e) => {
                log::warn!("search '{}' failed: {}", term.unwrap_or("<browse>"), e);
                Vec::new()
            }
        }
    }

    /// The genre vocabulary, fetched on first use.
    pub async fn genre_vocabulary(&self) -> Arc<GenreVocabulary> {
        if let Some(vocab) = self.genres.lock().await.as_ref() {
            return Arc::clone(vocab);
        }

        // Not held across the fetch; two concurrent first calls both fetch.
        match self.api.genres().await {
            Ok(vocab) => {
                let vocab = Arc::new(vocab);
                *self.genres.lock().await = Some(Arc::clone(&vocab));
                vocab
            }
            Err(e) => {
                log::warn!("genres failed: {}", e);
                Arc::new(GenreVocabulary::new())
            }
        }
    }

    /// Covers for the given games, keyed by owning game id.
    pub async fn covers(&self, game_ids: &[i64]) -> HashMap<i64, CoverRecord> {
        if game_ids.is_empty() {
            return HashMap::new();
        }

        match self.api.covers(game_ids).await {
            Ok(covers) => covers.into_iter().map(|c| (c.game, c)).collect(),
            Err(e) => {
                log::warn!("covers for {} games failed: {}", game_ids.len(), e);
                HashMap::new()
            }
        }
    }

    /// Number of distinct search terms currently cached.
    pub async fn cached_searches(&self) -> usize {
        self.searches.lock().await.len()
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
