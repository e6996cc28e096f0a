use async_trait::async_trait;

use super::model::*;

#[async_trait]
pub trait WatchlistRepo: Send + Sync {
    async fn create(&self) -> StoreResult<Watchlist>;
    async fn get(&self, watchlist_id: i64) -> StoreResult<Watchlist>;
    async fn add_movie(&self, watchlist_id: i64, movie_id: i64) -> StoreResult<bool>;
    async fn remove_movie(&self, watchlist_id: i64, movie_id: i64) -> StoreResult<bool>;
}
