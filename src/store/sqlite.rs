use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::model::*;
use super::repo::WatchlistRepo;

pub struct SqliteWatchlistStore {
    pool: SqlitePool,
}

impl SqliteWatchlistStore {
    pub async fn new(db_path: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        info!("Watchlist database initialized at {}", db_path);

        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }

    async fn ensure_exists(&self, watchlist_id: i64) -> StoreResult<()> {
        sqlx::query_as::<_, (i64,)>("SELECT watchlist_id FROM watchlist WHERE watchlist_id = ?")
            .bind(watchlist_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    StoreError::NotFound(format!("Watchlist not found: {}", watchlist_id))
                }
                _ => StoreError::Sqlx(e),
            })?;
        Ok(())
    }
}

#[async_trait]
impl WatchlistRepo for SqliteWatchlistStore {
    async fn create(&self) -> StoreResult<Watchlist> {
        let result = sqlx::query("INSERT INTO watchlist (created) VALUES (?)")
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(Watchlist {
            watchlist_id: result.last_insert_rowid(),
            movie_ids: Vec::new(),
        })
    }

    async fn get(&self, watchlist_id: i64) -> StoreResult<Watchlist> {
        self.ensure_exists(watchlist_id).await?;

        let rows = sqlx::query_as::<_, (i64,)>(
            "SELECT movie_id FROM watchlist_movie WHERE watchlist_id = ? ORDER BY movie_id",
        )
        .bind(watchlist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Watchlist {
            watchlist_id,
            movie_ids: rows.into_iter().map(|r| r.0).collect(),
        })
    }

    async fn add_movie(&self, watchlist_id: i64, movie_id: i64) -> StoreResult<bool> {
        self.ensure_exists(watchlist_id).await?;

        // INSERT OR IGNORE keeps the (watchlist_id, movie_id) primary key
        // duplicate-free without failing the idempotent re-add.
        sqlx::query(
            "INSERT OR IGNORE INTO watchlist_movie (watchlist_id, movie_id, added) VALUES (?, ?, ?)",
        )
        .bind(watchlist_id)
        .bind(movie_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    async fn remove_movie(&self, watchlist_id: i64, movie_id: i64) -> StoreResult<bool> {
        self.ensure_exists(watchlist_id).await?;

        sqlx::query("DELETE FROM watchlist_movie WHERE watchlist_id = ? AND movie_id = ?")
            .bind(watchlist_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }
}
