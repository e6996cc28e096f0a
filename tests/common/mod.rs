//! Shared test harness for gateway integration tests.
//!
//! Spins up a wiremock stand-in for TMDB plus the gateway router on a
//! random port, so tests drive the real HTTP surface end to end.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::json;
use wiremock::MockServer;

use pipoca_rs::config::Config;
use pipoca_rs::server::{build_router, AppState};
use pipoca_rs::store::MemoryWatchlistStore;
use pipoca_rs::tmdb::TmdbClient;

pub const API_KEY: &str = "test-api-key";

pub struct TestHarness {
    /// The fake TMDB endpoint; mount mocks on this.
    pub tmdb: MockServer,
    pub addr: SocketAddr,
}

impl TestHarness {
    /// Start the gateway on a random port, talking to a fresh mock TMDB
    /// server and an in-memory watchlist store.
    pub async fn with_server() -> Self {
        let tmdb = MockServer::start().await;

        let client = TmdbClient::new(API_KEY.to_string(), tmdb.uri())
            .expect("failed to create TMDB client");
        let state = AppState::new(
            Config::default(),
            Arc::new(client),
            Arc::new(MemoryWatchlistStore::new()),
        );
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { tmdb, addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// A TMDB movie-details payload the way the real API shapes it, with more
/// fields than the gateway consumes.
pub fn tmdb_movie_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "adult": false,
        "backdrop_path": format!("/backdrop-{id}.jpg"),
        "budget": 63000000,
        "genres": [
            {"id": 28, "name": "Action"},
            {"id": 878, "name": "Science Fiction"}
        ],
        "homepage": "http://www.example.com",
        "id": id,
        "imdb_id": "tt0133093",
        "original_language": "en",
        "original_title": title,
        "overview": "A computer hacker learns the truth.",
        "popularity": 84.4,
        "poster_path": format!("/poster-{id}.jpg"),
        "release_date": "1999-03-31",
        "revenue": 463517383,
        "runtime": 136,
        "status": "Released",
        "tagline": "Welcome to the Real World.",
        "title": title,
        "video": false,
        "vote_average": 8.2,
        "vote_count": 24000
    })
}

/// The error envelope TMDB answers with when a lookup fails.
pub fn tmdb_error_json(status_code: i32, status_message: &str) -> serde_json::Value {
    json!({
        "success": false,
        "status_code": status_code,
        "status_message": status_message
    })
}
