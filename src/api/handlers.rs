use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::error;

use crate::server::AppState;
use crate::store::{StoreError, Watchlist};
use crate::tmdb::{SearchParams, TmdbError, TmdbMovieDetails, TmdbStatus};

use super::error::ApiError;
use super::mappers::{to_movie_details, to_search_page, to_watchlist_page};
use super::types::{
    DetailsQuery, MovieDetails, RateMovieBody, SearchPage, SearchQuery, WatchlistPage,
    WatchlistQuery,
};

pub async fn get_movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<MovieDetails>, ApiError> {
    let language = query
        .language
        .as_deref()
        .unwrap_or(&state.config.tmdb.language);

    match state.tmdb.movie_details(movie_id, language).await {
        Ok(details) => Ok(Json(to_movie_details(
            &details,
            &state.config.tmdb.image_base_url,
        ))),
        Err(TmdbError::Api {
            status_code,
            status_message,
        }) => Err(ApiError::Provider {
            status_code,
            status_message,
        }),
        Err(err) => {
            error!("movie details lookup for {} failed: {}", movie_id, err);
            Err(ApiError::Failure(format!(
                "could not fetch details for movie {}",
                movie_id
            )))
        }
    }
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchPage>, ApiError> {
    let params = SearchParams {
        query: query.query.clone(),
        language: query
            .language
            .clone()
            .unwrap_or_else(|| state.config.tmdb.language.clone()),
        page: query.page,
        year: query.year,
    };

    match state.tmdb.search_movies(&params).await {
        Ok(page) => Ok(Json(to_search_page(
            &page,
            &state.config.tmdb.image_base_url,
        ))),
        Err(TmdbError::Api {
            status_code,
            status_message,
        }) => Err(ApiError::Provider {
            status_code,
            status_message,
        }),
        Err(err) => {
            error!("movie search for {} failed: {}", query.query, err);
            Err(ApiError::Failure(format!(
                "could not search for the term: {}",
                query.query
            )))
        }
    }
}

pub async fn create_watchlist(State(state): State<AppState>) -> Result<Json<Watchlist>, ApiError> {
    match state.watchlists.create().await {
        Ok(watchlist) => Ok(Json(watchlist)),
        Err(err) => {
            error!("watchlist create failed: {}", err);
            Err(ApiError::Failure("could not create a new watchlist".to_string()))
        }
    }
}

/// GET /api/watchlist?watchlist_id=N
/// Resolves every stored movie id against the provider.
pub async fn get_watchlist(
    State(state): State<AppState>,
    Query(query): Query<WatchlistQuery>,
) -> Result<Json<WatchlistPage>, ApiError> {
    let watchlist = match state.watchlists.get(query.watchlist_id).await {
        Ok(watchlist) => watchlist,
        Err(StoreError::NotFound(msg)) => return Err(ApiError::NotFound(msg)),
        Err(err) => {
            error!("watchlist {} lookup failed: {}", query.watchlist_id, err);
            return Err(ApiError::Failure(format!(
                "could not fetch watchlist {}",
                query.watchlist_id
            )));
        }
    };

    let language = query
        .language
        .as_deref()
        .unwrap_or(&state.config.tmdb.language);

    // One provider lookup per stored movie. The first failure aborts the
    // whole request so the caller never sees a partial page.
    let mut movies: Vec<TmdbMovieDetails> = Vec::with_capacity(watchlist.movie_ids.len());
    for movie_id in &watchlist.movie_ids {
        match state.tmdb.movie_details(*movie_id, language).await {
            Ok(details) => movies.push(details),
            Err(err) => {
                error!(
                    "watchlist {} lookup for movie {} failed: {}",
                    query.watchlist_id, movie_id, err
                );
                return Err(ApiError::Failure(format!(
                    "could not fetch watchlist {}",
                    query.watchlist_id
                )));
            }
        }
    }

    Ok(Json(to_watchlist_page(
        watchlist.watchlist_id,
        &movies,
        &state.config.tmdb.image_base_url,
    )))
}

pub async fn add_movie(
    State(state): State<AppState>,
    Path((watchlist_id, movie_id)): Path<(i64, i64)>,
) -> Result<Json<bool>, ApiError> {
    match state.watchlists.add_movie(watchlist_id, movie_id).await {
        Ok(done) => Ok(Json(done)),
        Err(StoreError::NotFound(msg)) => Err(ApiError::NotFound(msg)),
        Err(err) => {
            error!(
                "adding movie {} to watchlist {} failed: {}",
                movie_id, watchlist_id, err
            );
            Err(ApiError::Failure(format!(
                "could not add movie {} to watchlist {}",
                movie_id, watchlist_id
            )))
        }
    }
}

pub async fn remove_movie(
    State(state): State<AppState>,
    Path((watchlist_id, movie_id)): Path<(i64, i64)>,
) -> Result<Json<bool>, ApiError> {
    match state.watchlists.remove_movie(watchlist_id, movie_id).await {
        Ok(done) => Ok(Json(done)),
        Err(StoreError::NotFound(msg)) => Err(ApiError::NotFound(msg)),
        Err(err) => {
            error!(
                "removing movie {} from watchlist {} failed: {}",
                movie_id, watchlist_id, err
            );
            Err(ApiError::Failure(format!(
                "could not remove movie {} from watchlist {}",
                movie_id, watchlist_id
            )))
        }
    }
}

/// PUT /api/movie/rate with body `{ "movie_id": .., "rate_value": .. }`.
pub async fn rate_movie(
    State(state): State<AppState>,
    Json(body): Json<RateMovieBody>,
) -> Result<Json<TmdbStatus>, ApiError> {
    match state.tmdb.rate_movie(body.movie_id, body.rate_value).await {
        Ok(status) => Ok(Json(status)),
        Err(TmdbError::Api {
            status_code,
            status_message,
        }) => Err(ApiError::Provider {
            status_code,
            status_message,
        }),
        Err(err) => {
            error!("rating movie {} failed: {}", body.movie_id, err);
            Err(ApiError::Failure(format!(
                "could not rate movie {}",
                body.movie_id
            )))
        }
    }
}
