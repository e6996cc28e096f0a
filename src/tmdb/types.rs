use serde::{Deserialize, Serialize};

// TMDB v3 response shapes, trimmed to the fields the gateway consumes.

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchPage {
    pub page: u32,
    pub results: Vec<TmdbSearchMovie>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchMovie {
    pub id: i64,
    pub title: String,
    pub original_title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: i64,
    pub title: String,
    pub original_title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

// TMDB's status envelope: the error payload of failed calls, and the body
// of a successful rating call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbStatus {
    #[serde(default)]
    pub success: bool,
    pub status_code: i32,
    pub status_message: String,
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub language: String,
    pub page: Option<u32>,
    pub year: Option<i32>,
}
