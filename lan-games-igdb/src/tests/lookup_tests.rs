use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::*;

fn record(id: i64, name: &str) -> CatalogRecord {
    CatalogRecord {
        external_id: id,
        name: name.to_string(),
        summary: None,
        genre_codes: vec![],
        first_release_date: None,
        total_rating: None,
        url: format!("https://www.igdb.com/games/{}", id),
        cover: None,
    }
}

#[derive(Default)]
struct FakeApi {
    fail: AtomicBool,
    searches: AtomicUsize,
    genre_calls: AtomicUsize,
    cover_calls: StdMutex<Vec<Vec<i64>>>,
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn search_games(&self, term: Option<&str>) -> Result<Vec<CatalogRecord>, IgdbError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(IgdbError::RateLimit);
        }
        Ok(vec![record(1, term.unwrap_or("Browsed"))])
    }

    async fn genres(&self) -> Result<GenreVocabulary, IgdbError> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(IgdbError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        Ok([(5, "Shooter".to_string()), (12, "Role-playing (RPG)".to_string())]
            .into_iter()
            .collect())
    }

    async fn covers(&self, game_ids: &[i64]) -> Result<Vec<CoverRecord>, IgdbError> {
        self.cover_calls.lock().unwrap().push(game_ids.to_vec());
        Ok(game_ids
            .iter()
            .map(|&game| CoverRecord {
                id: game * 10,
                game,
                url: format!("//images.igdb.com/{}.jpg", game),
            })
            .collect())
    }
}

fn cache() -> (Arc<FakeApi>, LookupCache<Arc<FakeApi>>) {
    let api = Arc::new(FakeApi::default());
    (Arc::clone(&api), LookupCache::new(api))
}

#[tokio::test]
async fn repeated_term_hits_cache() {
    let (api, cache) = cache();
    let first = cache.search_games(Some("Overcooked")).await;
    let second = cache.search_games(Some("Overcooked")).await;
    assert_eq!(first, second);
    assert_eq!(api.searches.load(Ordering::SeqCst), 1);
    assert_eq!(cache.cached_searches().await, 1);
}

#[tokio::test]
async fn cache_key_is_case_sensitive() {
    let (api, cache) = cache();
    cache.search_games(Some("Overcooked")).await;
    cache.search_games(Some("overcooked")).await;
    assert_eq!(api.searches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn browse_mode_is_not_cached() {
    let (api, cache) = cache();
    let browsed = cache.search_games(None).await;
    cache.search_games(None).await;
    assert_eq!(browsed[0].name, "Browsed");
    assert_eq!(api.searches.load(Ordering::SeqCst), 2);
    assert_eq!(cache.cached_searches().await, 0);
}

#[tokio::test]
async fn failed_search_is_empty_and_not_cached() {
    let (api, cache) = cache();
    api.fail.store(true, Ordering::SeqCst);
    assert!(cache.search_games(Some("Quake")).await.is_empty());

    api.fail.store(false, Ordering::SeqCst);
    let retried = cache.search_games(Some("Quake")).await;
    assert_eq!(retried.len(), 1);
    assert_eq!(api.searches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn genre_vocabulary_fetched_once() {
    let (api, cache) = cache();
    let first = cache.genre_vocabulary().await;
    let second = cache.genre_vocabulary().await;
    assert_eq!(first.name(5), Some("Shooter"));
    assert_eq!(second.name_for_key("12"), Some("Role-playing (RPG)"));
    assert_eq!(api.genre_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_genre_fetch_is_retried_later() {
    let (api, cache) = cache();
    api.fail.store(true, Ordering::SeqCst);
    assert!(cache.genre_vocabulary().await.is_empty());

    api.fail.store(false, Ordering::SeqCst);
    assert_eq!(cache.genre_vocabulary().await.len(), 2);
    assert_eq!(api.genre_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_cover_request_skips_network() {
    let (api, cache) = cache();
    assert!(cache.covers(&[]).await.is_empty());
    assert!(api.cover_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn covers_keyed_by_game_in_one_call() {
    let (api, cache) = cache();
    let covers = cache.covers(&[7346, 1020]).await;
    assert_eq!(covers.len(), 2);
    assert_eq!(covers[&7346].url, "//images.igdb.com/7346.jpg");
    assert_eq!(*api.cover_calls.lock().unwrap(), vec![vec![7346, 1020]]);
}
