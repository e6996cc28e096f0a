use serde::{Deserialize, Serialize};

// Gateway-facing response shapes. The provider's raw field names stay
// behind the mapping layer; clients only ever see these.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<SearchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub movie_id: i64,
    pub title: String,
    pub original_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub vote_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub movie_id: i64,
    pub title: String,
    pub original_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub vote_average: f64,
    pub vote_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistPage {
    pub watchlist_id: i64,
    pub movies: Vec<MovieDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

// Typed request parameters; axum rejects anything that does not fit these
// before a handler runs.

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub language: Option<String>,
    pub page: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct WatchlistQuery {
    pub watchlist_id: i64,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RateMovieBody {
    pub movie_id: i64,
    pub rate_value: f64,
}
