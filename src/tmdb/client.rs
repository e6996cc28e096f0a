use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::types::{SearchParams, TmdbMovieDetails, TmdbSearchPage, TmdbStatus};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("TMDB API error: {status_code} - {status_message}")]
    Api {
        status_code: i32,
        status_message: String,
    },
    #[error("TMDB request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to decode TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, TmdbError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub async fn search_movies(&self, params: &SearchParams) -> Result<TmdbSearchPage, TmdbError> {
        let url = format!("{}/search/movie", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("query", params.query.clone()),
            ("language", params.language.clone()),
        ];
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }

        debug!(query = %params.query, "TMDB movie search");

        let response = self.client.get(&url).query(&query).send().await?;
        Self::decode(response).await
    }

    pub async fn movie_details(
        &self,
        movie_id: i64,
        language: &str,
    ) -> Result<TmdbMovieDetails, TmdbError> {
        let url = format!("{}/movie/{}", self.base_url, movie_id);

        debug!(movie_id, "TMDB movie details");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", language)])
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn rate_movie(&self, movie_id: i64, value: f64) -> Result<TmdbStatus, TmdbError> {
        let url = format!("{}/movie/{}/rating", self.base_url, movie_id);

        debug!(movie_id, value, "TMDB movie rating");

        let response = self
            .client
            .post(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .json(&serde_json::json!({ "value": value }))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TmdbError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // TMDB reports failures through its status envelope; fall back
            // to the HTTP status when the body is something else.
            if let Ok(err) = serde_json::from_str::<TmdbStatus>(&body) {
                return Err(TmdbError::Api {
                    status_code: err.status_code,
                    status_message: err.status_message,
                });
            }
            let status_message = if body.is_empty() {
                format!("HTTP {}", status)
            } else {
                body
            };
            return Err(TmdbError::Api {
                status_code: i32::from(status.as_u16()),
                status_message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
