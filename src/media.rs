use serde::Deserialize;

pub type MovieId = u64;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("rate limited by TMDB")]
    RateLimit,
    #[error("TMDB rejected the API key")]
    Unauthorized,
}

/// Fields that only a per-movie detail fetch provides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieDetails {
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub trailer_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
    pub release_date: String,
    pub details: Option<MovieDetails>,
}

impl Movie {
    pub fn is_full(&self) -> bool {
        self.details.is_some()
    }

    pub fn runtime(&self) -> Option<u32> {
        self.details.as_ref().and_then(|d| d.runtime)
    }

    pub fn trailer_key(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.trailer_key.as_deref())
    }

    /// Folds a newer record for the same id into this one. A partial record
    /// refreshes the list fields but never drops details already known.
    pub fn merge(&mut self, incoming: Movie) {
        let details = incoming.details.or_else(|| self.details.take());
        *self = Movie {
            details,
            ..incoming
        };
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// A movie as it appears in list endpoints (`now_playing`, `search/movie`).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieResult {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl From<TmdbMovieResult> for Movie {
    fn from(result: TmdbMovieResult) -> Self {
        Self {
            id: result.id,
            title: result.title,
            overview: result.overview,
            poster_path: result.poster_path,
            backdrop_path: result.backdrop_path,
            vote_average: result.vote_average,
            release_date: result.release_date.unwrap_or_default(),
            details: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TmdbListResponse {
    pub results: Vec<TmdbMovieResult>,
}

/// `/movie/{id}`: the list fields plus runtime and genres.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(flatten)]
    pub movie: TmdbMovieResult,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl TmdbMovieDetails {
    pub fn into_movie(self, trailer_key: Option<String>) -> Movie {
        let details = MovieDetails {
            runtime: self.runtime,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            trailer_key,
        };
        Movie {
            details: Some(details),
            ..Movie::from(self.movie)
        }
    }
}
