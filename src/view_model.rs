//! Everything the window needs to draw, derived from a [`Session`] without
//! touching any rendering types.

use crate::media::{Movie, MovieId};
use crate::session::{FetchKind, Session, View};
use crate::sort::{sort_movies, SortKey};
use crate::tmdb::{image_url, ImageSize};
use crate::video::youtube_url;

#[derive(Debug, Clone, PartialEq)]
pub struct CardModel {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub vote_average: f32,
    pub favorited: bool,
    pub watched: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailModel {
    pub id: MovieId,
    pub title: String,
    pub backdrop_url: Option<String>,
    pub release_date: String,
    pub runtime_label: Option<String>,
    pub genres_label: Option<String>,
    pub overview: String,
    pub trailer_key: Option<String>,
    pub trailer_url: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub favorited: bool,
    pub watched: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub view: View,
    pub sort: SortKey,
    pub search_input: String,
    pub cards: Vec<CardModel>,
    pub show_load_more: bool,
    pub loading: bool,
    pub empty_message: Option<String>,
    pub error: Option<String>,
    pub detail_open: bool,
    pub detail: Option<DetailModel>,
}

pub fn format_runtime(minutes: u32) -> String {
    format!("{} mins", minutes)
}

pub fn format_rating(vote_average: f32) -> String {
    format!("Rating: {:.1}", vote_average)
}

impl Session {
    /// Movies of the active view in display order.
    pub fn visible_movies(&self) -> Vec<&Movie> {
        let projected = match self.view {
            View::NowPlaying => self.cache.project(self.feed.ids.iter().copied()),
            View::Search => self.cache.project(self.search.ids.iter().copied()),
            View::Favorites => self.cache.project(self.favorites.iter()),
            View::Watched => self.cache.project(self.watched.iter()),
        };
        sort_movies(&projected, self.sort)
    }

    pub fn view_model(&self) -> ViewModel {
        let cards: Vec<CardModel> = self
            .visible_movies()
            .into_iter()
            .map(|movie| self.card_model(movie))
            .collect();

        let loading = self.is_loading();
        let empty_message = if cards.is_empty() && !loading {
            self.empty_message()
        } else {
            None
        };

        ViewModel {
            view: self.view,
            sort: self.sort,
            search_input: self.search_input.clone(),
            show_load_more: self.view == View::NowPlaying && self.feed.has_more && !loading,
            loading,
            empty_message,
            error: self.failure().map(|f| f.user_message().to_string()),
            detail_open: self.selected.is_some(),
            detail: self.selected.and_then(|id| self.detail_model(id)),
            cards,
        }
    }

    fn card_model(&self, movie: &Movie) -> CardModel {
        CardModel {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|path| image_url(path, ImageSize::Poster)),
            vote_average: movie.vote_average,
            favorited: self.favorites.contains(movie.id),
            watched: self.watched.contains(movie.id),
        }
    }

    fn empty_message(&self) -> Option<String> {
        match self.view {
            View::NowPlaying => None,
            View::Search if self.search.query.is_empty() => None,
            View::Search => Some(format!("No results found for \"{}\".", self.search.query)),
            View::Favorites => Some(String::from("No favorites yet.")),
            View::Watched => Some(String::from("Nothing marked as watched yet.")),
        }
    }

    fn detail_model(&self, id: MovieId) -> Option<DetailModel> {
        let movie = self.cache.get(id)?;
        let details = movie.details.as_ref();
        let trailer_key = movie.trailer_key().map(str::to_string);
        let loading = self.pending_details.contains(&id);

        Some(DetailModel {
            id,
            title: movie.title.clone(),
            backdrop_url: movie
                .backdrop_path
                .as_deref()
                .map(|path| image_url(path, ImageSize::Original)),
            release_date: movie.release_date.clone(),
            runtime_label: movie.runtime().map(format_runtime),
            genres_label: details
                .filter(|d| !d.genres.is_empty())
                .map(|d| d.genres.join(", ")),
            overview: movie.overview.clone(),
            trailer_url: trailer_key.as_deref().map(youtube_url),
            trailer_key,
            loading,
            error: self
                .failure_of(FetchKind::Detail)
                .filter(|_| !loading && !movie.is_full())
                .map(|f| f.user_message().to_string()),
            favorited: self.favorites.contains(id),
            watched: self.watched.contains(id),
        })
    }
}
