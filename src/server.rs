use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::store::WatchlistRepo;
use crate::tmdb::TmdbClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tmdb: Arc<TmdbClient>,
    pub watchlists: Arc<dyn WatchlistRepo>,
}

impl AppState {
    pub fn new(config: Config, tmdb: Arc<TmdbClient>, watchlists: Arc<dyn WatchlistRepo>) -> Self {
        Self {
            config: Arc::new(config),
            tmdb,
            watchlists,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // "/api/movie/rate" is static, so it wins over the ":movie_id" capture.
    let api_routes = Router::new()
        .route("/api/movie/rate", put(crate::api::rate_movie))
        .route("/api/movie/:movie_id", get(crate::api::get_movie_details))
        .route("/api/search/movie", get(crate::api::search_movies))
        .route("/api/watchlist", get(crate::api::get_watchlist))
        .route("/api/watchlist/create", post(crate::api::create_watchlist))
        .route(
            "/api/watchlist/:watchlist_id/add/:movie_id",
            post(crate::api::add_movie),
        )
        .route(
            "/api/watchlist/:watchlist_id/remove/:movie_id",
            delete(crate::api::remove_movie),
        );

    Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::normalize_path))
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    // Bare OPTIONS (no preflight headers) still gets a friendly 200.
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryWatchlistStore;
    use axum::body::Body;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let tmdb = TmdbClient::new("test-key".to_string(), "http://127.0.0.1:9".to_string())
            .unwrap();
        AppState::new(
            Config::default(),
            Arc::new(tmdb),
            Arc::new(MemoryWatchlistStore::new()),
        )
    }

    #[tokio::test]
    async fn test_robots_txt() {
        let router = build_router(test_state());
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/robots.txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"User-agent: *\nDisallow: /\n");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let router = build_router(test_state());
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_options_fallback_is_200() {
        let router = build_router(test_state());
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .method("OPTIONS")
                    .uri("/api/watchlist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_double_slashes_are_normalized() {
        let router = build_router(test_state());
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api//watchlist//create")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
