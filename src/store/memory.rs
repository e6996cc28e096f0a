use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::*;
use super::repo::WatchlistRepo;

pub struct MemoryWatchlistStore {
    inner: RwLock<Inner>,
}

struct Inner {
    next_id: i64,
    lists: HashMap<i64, BTreeSet<i64>>,
}

impl MemoryWatchlistStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                lists: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryWatchlistStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WatchlistRepo for MemoryWatchlistStore {
    async fn create(&self) -> StoreResult<Watchlist> {
        let mut inner = self.inner.write().await;
        let watchlist_id = inner.next_id;
        inner.next_id += 1;
        inner.lists.insert(watchlist_id, BTreeSet::new());

        Ok(Watchlist {
            watchlist_id,
            movie_ids: Vec::new(),
        })
    }

    async fn get(&self, watchlist_id: i64) -> StoreResult<Watchlist> {
        let inner = self.inner.read().await;
        let movies = inner
            .lists
            .get(&watchlist_id)
            .ok_or_else(|| StoreError::NotFound(format!("Watchlist not found: {}", watchlist_id)))?;

        Ok(Watchlist {
            watchlist_id,
            movie_ids: movies.iter().copied().collect(),
        })
    }

    async fn add_movie(&self, watchlist_id: i64, movie_id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let movies = inner
            .lists
            .get_mut(&watchlist_id)
            .ok_or_else(|| StoreError::NotFound(format!("Watchlist not found: {}", watchlist_id)))?;

        // Re-adding a movie is a no-op, the set stays duplicate-free.
        movies.insert(movie_id);
        Ok(true)
    }

    async fn remove_movie(&self, watchlist_id: i64, movie_id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let movies = inner
            .lists
            .get_mut(&watchlist_id)
            .ok_or_else(|| StoreError::NotFound(format!("Watchlist not found: {}", watchlist_id)))?;

        // Removing an absent movie succeeds; the caller only cares that
        // the movie is gone afterwards.
        movies.remove(&movie_id);
        Ok(true)
    }
}
