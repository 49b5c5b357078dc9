use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::media::{ApiError, Movie, MovieId, TmdbListResponse, TmdbMovieDetails};
use crate::settings::AppSettings;
use crate::video::{TrailerVideo, VideosResponse};

const API_BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Poster,
    Original,
}

pub fn image_url(path: &str, size: ImageSize) -> String {
    let size_path = match size {
        ImageSize::Poster => "w500",
        ImageSize::Original => "original",
    };
    format!("{}/{}{}", IMAGE_BASE_URL, size_path, path)
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

/// The four read-only TMDB endpoints the client consumes.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn now_playing(&self, page: u32) -> Result<Vec<Movie>, ApiError>;
    async fn search_movies(&self, query: &str, page: u32) -> Result<Vec<Movie>, ApiError>;
    async fn movie_details(&self, id: MovieId) -> Result<TmdbMovieDetails, ApiError>;
    async fn movie_videos(&self, id: MovieId) -> Result<Vec<TrailerVideo>, ApiError>;
}

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            api_key,
            base_url: String::from(API_BASE_URL),
            language,
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.api_key.clone(), settings.language_or_default())
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}?api_key={}&language={}",
            self.base_url, endpoint, self.api_key, self.language
        )
    }

    fn build_url_with_params(&self, endpoint: &str, params: &str) -> String {
        format!("{}&{}", self.build_url(endpoint), params)
    }

    async fn fetch_response(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status().as_u16() {
            401 => Err(ApiError::Unauthorized),
            429 => Err(ApiError::RateLimit),
            s if s >= 400 => Err(ApiError::Network(format!("HTTP error: {}", s))),
            _ => Ok(response),
        }
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ApiError> {
        self.fetch_response(url)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn fetch_list(&self, url: &str) -> Result<Vec<Movie>, ApiError> {
        let response: TmdbListResponse = self.fetch_json(url).await?;
        Ok(response.results.into_iter().map(Movie::from).collect())
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn now_playing(&self, page: u32) -> Result<Vec<Movie>, ApiError> {
        debug!(page, "fetching now playing");
        let url = self.build_url_with_params("/movie/now_playing", &format!("page={}", page));
        self.fetch_list(&url).await
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<Vec<Movie>, ApiError> {
        debug!(query, page, "searching movies");
        let url = self.build_url_with_params(
            "/search/movie",
            &format!("query={}&page={}", url_encode(query), page),
        );
        self.fetch_list(&url).await
    }

    async fn movie_details(&self, id: MovieId) -> Result<TmdbMovieDetails, ApiError> {
        debug!(id, "fetching movie details");
        self.fetch_json(&self.build_url(&format!("/movie/{}", id)))
            .await
    }

    async fn movie_videos(&self, id: MovieId) -> Result<Vec<TrailerVideo>, ApiError> {
        debug!(id, "fetching movie videos");
        let response: VideosResponse = self
            .fetch_json(&self.build_url(&format!("/movie/{}/videos", id)))
            .await?;
        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_query_strings() {
        assert_eq!(url_encode("star wars"), "star%20wars");
        assert_eq!(url_encode("amélie"), "am%C3%A9lie");
        assert_eq!(url_encode("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn builds_image_urls() {
        assert_eq!(
            image_url("/abc.jpg", ImageSize::Poster),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            image_url("/abc.jpg", ImageSize::Original),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[test]
    fn builds_endpoint_urls() {
        let client = TmdbClient::new(String::from("key"), String::from("en-US"));
        assert_eq!(
            client.build_url_with_params("/movie/now_playing", "page=2"),
            "https://api.themoviedb.org/3/movie/now_playing?api_key=key&language=en-US&page=2"
        );
    }
}
