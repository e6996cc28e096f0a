use crate::tmdb::{TmdbMovieDetails, TmdbSearchPage};

use super::types::{MovieDetails, SearchItem, SearchPage, WatchlistPage};

// Provider image paths are relative ("/abc123.jpg"); clients get a URL
// they can fetch directly.
fn image_url(image_base_url: &str, path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{}{}", image_base_url.trim_end_matches('/'), p))
}

pub fn to_search_page(page: &TmdbSearchPage, image_base_url: &str) -> SearchPage {
    SearchPage {
        page: page.page,
        total_pages: page.total_pages,
        total_results: page.total_results,
        results: page
            .results
            .iter()
            .map(|movie| SearchItem {
                movie_id: movie.id,
                title: movie.title.clone(),
                original_title: movie.original_title.clone(),
                release_date: movie.release_date.clone(),
                overview: movie.overview.clone(),
                vote_average: movie.vote_average,
                poster_url: image_url(image_base_url, movie.poster_path.as_deref()),
            })
            .collect(),
    }
}

pub fn to_movie_details(details: &TmdbMovieDetails, image_base_url: &str) -> MovieDetails {
    MovieDetails {
        movie_id: details.id,
        title: details.title.clone(),
        original_title: details.original_title.clone(),
        tagline: details.tagline.clone(),
        overview: details.overview.clone(),
        release_date: details.release_date.clone(),
        runtime: details.runtime,
        genres: details.genres.iter().map(|genre| genre.name.clone()).collect(),
        vote_average: details.vote_average,
        vote_count: details.vote_count,
        poster_url: image_url(image_base_url, details.poster_path.as_deref()),
        backdrop_url: image_url(image_base_url, details.backdrop_path.as_deref()),
    }
}

pub fn to_watchlist_page(
    watchlist_id: i64,
    movies: &[TmdbMovieDetails],
    image_base_url: &str,
) -> WatchlistPage {
    WatchlistPage {
        watchlist_id,
        movies: movies
            .iter()
            .map(|details| to_movie_details(details, image_base_url))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::{TmdbGenre, TmdbSearchMovie};

    const IMAGES: &str = "https://image.tmdb.org/t/p/original";

    fn search_movie(id: i64, title: &str) -> TmdbSearchMovie {
        TmdbSearchMovie {
            id,
            title: title.to_string(),
            original_title: title.to_string(),
            release_date: Some("1999-03-31".to_string()),
            overview: Some("overview".to_string()),
            vote_average: 8.2,
            poster_path: Some(format!("/poster-{}.jpg", id)),
        }
    }

    fn movie_details(id: i64) -> TmdbMovieDetails {
        TmdbMovieDetails {
            id,
            title: "The Matrix".to_string(),
            original_title: "The Matrix".to_string(),
            tagline: Some("Welcome to the Real World.".to_string()),
            overview: Some("overview".to_string()),
            release_date: Some("1999-03-31".to_string()),
            runtime: Some(136),
            genres: vec![
                TmdbGenre { name: "Action".to_string() },
                TmdbGenre { name: "Science Fiction".to_string() },
            ],
            vote_average: 8.2,
            vote_count: 24000,
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
        }
    }

    #[test]
    fn test_search_page_keeps_order_and_counts() {
        let page = TmdbSearchPage {
            page: 2,
            total_pages: 7,
            total_results: 133,
            results: vec![
                search_movie(603, "The Matrix"),
                search_movie(604, "The Matrix Reloaded"),
                search_movie(605, "The Matrix Revolutions"),
            ],
        };
        let mapped = to_search_page(&page, IMAGES);
        assert_eq!(mapped.page, 2);
        assert_eq!(mapped.total_pages, 7);
        assert_eq!(mapped.total_results, 133);
        let ids: Vec<i64> = mapped.results.iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![603, 604, 605]);
        assert_eq!(mapped.results[0].title, "The Matrix");
    }

    #[test]
    fn test_search_item_poster_url() {
        let page = TmdbSearchPage {
            page: 1,
            total_pages: 1,
            total_results: 1,
            results: vec![search_movie(603, "The Matrix")],
        };
        let mapped = to_search_page(&page, IMAGES);
        assert_eq!(
            mapped.results[0].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/poster-603.jpg")
        );
    }

    #[test]
    fn test_missing_poster_stays_absent() {
        let mut movie = search_movie(603, "The Matrix");
        movie.poster_path = None;
        let page = TmdbSearchPage {
            page: 1,
            total_pages: 1,
            total_results: 1,
            results: vec![movie],
        };
        let mapped = to_search_page(&page, IMAGES);
        assert!(mapped.results[0].poster_url.is_none());
        let json = serde_json::to_value(&mapped.results[0]).unwrap();
        assert!(json.get("poster_url").is_none());
    }

    #[test]
    fn test_details_flattens_genres() {
        let mapped = to_movie_details(&movie_details(603), IMAGES);
        assert_eq!(mapped.movie_id, 603);
        assert_eq!(mapped.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(
            mapped.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/poster.jpg")
        );
        assert!(mapped.backdrop_url.is_none());
    }

    #[test]
    fn test_image_base_trailing_slash() {
        let mapped = to_movie_details(&movie_details(603), "https://img.example.com/t/p/w500/");
        assert_eq!(
            mapped.poster_url.as_deref(),
            Some("https://img.example.com/t/p/w500/poster.jpg")
        );
    }

    #[test]
    fn test_watchlist_page_keeps_order() {
        let movies = vec![movie_details(603), movie_details(604)];
        let mapped = to_watchlist_page(9, &movies, IMAGES);
        assert_eq!(mapped.watchlist_id, 9);
        let ids: Vec<i64> = mapped.movies.iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![603, 604]);
    }
}
