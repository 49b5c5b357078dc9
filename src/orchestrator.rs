//! Request side of the fetch paths. Each function performs the network work
//! for one operation and returns plain data; merging into session state
//! happens when the result is fed back through [`crate::session::Action`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::media::{ApiError, Movie, MovieId};
use crate::tmdb::MovieApi;
use crate::video::select_trailer;

const SEARCH_PAGE: u32 = 1;

pub async fn load_now_playing(api: Arc<dyn MovieApi>, page: u32) -> Result<Vec<Movie>, ApiError> {
    let movies = api.now_playing(page).await.inspect_err(|e| {
        warn!(page, error = %e, "now playing request failed");
    })?;
    debug!(page, count = movies.len(), "now playing page received");
    Ok(movies)
}

/// Blank queries resolve to no results without touching the network.
pub async fn search(api: Arc<dyn MovieApi>, query: String) -> Result<Vec<Movie>, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let movies = api.search_movies(query, SEARCH_PAGE).await.inspect_err(|e| {
        warn!(query, error = %e, "search request failed");
    })?;
    debug!(query, count = movies.len(), "search results received");
    Ok(movies)
}

/// Details and videos are requested together and both awaited; either
/// failing fails the whole lookup.
pub async fn load_detail(api: Arc<dyn MovieApi>, id: MovieId) -> Result<Movie, ApiError> {
    let (details, videos) = tokio::join!(api.movie_details(id), api.movie_videos(id));

    let details = details.inspect_err(|e| warn!(id, error = %e, "detail request failed"))?;
    let videos = videos.inspect_err(|e| warn!(id, error = %e, "videos request failed"))?;

    let trailer_key = select_trailer(&videos).map(|v| v.key.clone());
    debug!(id, has_trailer = trailer_key.is_some(), "detail received");
    Ok(details.into_movie(trailer_key))
}
