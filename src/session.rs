use std::collections::HashSet;

use tracing::{debug, warn};

use crate::cache::EntityCache;
use crate::media::{ApiError, Movie, MovieId};
use crate::selection::SelectionSet;
use crate::sort::SortKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    NowPlaying,
    Search,
    Favorites,
    Watched,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::NowPlaying => write!(f, "Now Playing"),
            View::Search => write!(f, "Search"),
            View::Favorites => write!(f, "Favorites"),
            View::Watched => write!(f, "Watched"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlayingFeed {
    pub ids: Vec<MovieId>,
    pub page: u32,
    pub has_more: bool,
}

impl Default for NowPlayingFeed {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            page: 1,
            has_more: true,
        }
    }
}

impl NowPlayingFeed {
    fn append(&mut self, movies: &[Movie]) {
        for movie in movies {
            if !self.ids.contains(&movie.id) {
                self.ids.push(movie.id);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub query: String,
    pub ids: Vec<MovieId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    NowPlaying,
    Search,
    Detail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub kind: FetchKind,
    pub error: ApiError,
}

impl LoadFailure {
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            FetchKind::NowPlaying => "Failed to load movies.",
            FetchKind::Search => "Failed to search movies.",
            FetchKind::Detail => "Failed to fetch movie details.",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Navigate(View),
    SearchInputChanged(String),
    SubmitSearch,
    Clear,
    LoadMore,
    SetSort(SortKey),
    ToggleFavorite(MovieId),
    ToggleWatched(MovieId),
    OpenDetail(MovieId),
    CloseDetail,
    NowPlayingLoaded {
        page: u32,
        result: Result<Vec<Movie>, ApiError>,
    },
    SearchLoaded {
        query: String,
        result: Result<Vec<Movie>, ApiError>,
    },
    DetailLoaded {
        id: MovieId,
        result: Result<Movie, ApiError>,
    },
}

/// Work the caller must perform; its completion comes back as an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchNowPlaying { page: u32 },
    Search { query: String },
    FetchDetail { id: MovieId },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) view: View,
    pub(crate) feed: NowPlayingFeed,
    pub(crate) search: SearchResults,
    pub(crate) search_input: String,
    pub(crate) cache: EntityCache,
    pub(crate) favorites: SelectionSet,
    pub(crate) watched: SelectionSet,
    pub(crate) sort: SortKey,
    pub(crate) selected: Option<MovieId>,
    pub(crate) in_flight: usize,
    pub(crate) pending_details: HashSet<MovieId>,
    /// At most one entry per kind, oldest first.
    pub(crate) failures: Vec<LoadFailure>,
}

impl Session {
    /// Fresh session on the now-playing view, with its first page requested.
    pub fn start() -> (Self, Effect) {
        let mut session = Self::default();
        let effect = session.request(Effect::FetchNowPlaying { page: 1 });
        (session, effect)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn feed(&self) -> &NowPlayingFeed {
        &self.feed
    }

    pub fn search_results(&self) -> &SearchResults {
        &self.search
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    pub fn favorites(&self) -> &SelectionSet {
        &self.favorites
    }

    pub fn watched(&self) -> &SelectionSet {
        &self.watched
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn selected(&self) -> Option<MovieId> {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn is_detail_pending(&self, id: MovieId) -> bool {
        self.pending_details.contains(&id)
    }

    /// Most recent outstanding failure of any kind.
    pub fn failure(&self) -> Option<&LoadFailure> {
        self.failures.last()
    }

    pub fn failure_of(&self, kind: FetchKind) -> Option<&LoadFailure> {
        self.failures.iter().find(|f| f.kind == kind)
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Navigate(view) => self.navigate(view),
            Action::SearchInputChanged(input) => {
                if input.is_empty() {
                    self.search = SearchResults::default();
                }
                self.search_input = input;
                None
            }
            Action::SubmitSearch => self.submit_search(),
            Action::Clear => {
                self.search_input.clear();
                self.search = SearchResults::default();
                Some(self.enter_now_playing())
            }
            Action::LoadMore => self.load_more(),
            Action::SetSort(key) => {
                self.sort = key;
                None
            }
            Action::ToggleFavorite(id) => {
                let added = self.favorites.toggle(id);
                debug!(id, added, "toggled favorite");
                None
            }
            Action::ToggleWatched(id) => {
                let added = self.watched.toggle(id);
                debug!(id, added, "toggled watched");
                None
            }
            Action::OpenDetail(id) => {
                self.selected = Some(id);
                self.pending_details.insert(id);
                Some(self.request(Effect::FetchDetail { id }))
            }
            Action::CloseDetail => {
                self.selected = None;
                None
            }
            Action::NowPlayingLoaded { page, result } => {
                self.finish_request();
                self.on_now_playing_loaded(page, result);
                None
            }
            Action::SearchLoaded { query, result } => {
                self.finish_request();
                self.on_search_loaded(query, result);
                None
            }
            Action::DetailLoaded { id, result } => {
                self.finish_request();
                self.pending_details.remove(&id);
                self.on_detail_loaded(id, result);
                None
            }
        }
    }

    fn navigate(&mut self, view: View) -> Option<Effect> {
        if view == self.view {
            return None;
        }
        debug!(from = %self.view, to = %view, "navigating");
        match view {
            View::NowPlaying => Some(self.enter_now_playing()),
            View::Search => {
                self.view = View::Search;
                self.search = SearchResults::default();
                self.search_input.clear();
                None
            }
            View::Favorites | View::Watched => {
                self.view = view;
                None
            }
        }
    }

    fn enter_now_playing(&mut self) -> Effect {
        self.view = View::NowPlaying;
        self.feed = NowPlayingFeed::default();
        self.request(Effect::FetchNowPlaying { page: 1 })
    }

    fn submit_search(&mut self) -> Option<Effect> {
        let query = self.search_input.trim().to_string();
        if query.is_empty() {
            return None;
        }
        self.view = View::Search;
        self.search.query = query.clone();
        Some(self.request(Effect::Search { query }))
    }

    fn load_more(&mut self) -> Option<Effect> {
        if self.view != View::NowPlaying || !self.feed.has_more {
            return None;
        }
        self.feed.page += 1;
        let page = self.feed.page;
        Some(self.request(Effect::FetchNowPlaying { page }))
    }

    fn request(&mut self, effect: Effect) -> Effect {
        self.in_flight += 1;
        effect
    }

    fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn record_failure(&mut self, kind: FetchKind, error: ApiError) {
        warn!(?kind, error = %error, "load failed");
        self.clear_failure(kind);
        self.failures.push(LoadFailure { kind, error });
    }

    fn clear_failure(&mut self, kind: FetchKind) {
        self.failures.retain(|f| f.kind != kind);
    }

    fn on_now_playing_loaded(&mut self, page: u32, result: Result<Vec<Movie>, ApiError>) {
        let movies = match result {
            Ok(movies) => movies,
            Err(error) => return self.record_failure(FetchKind::NowPlaying, error),
        };
        self.clear_failure(FetchKind::NowPlaying);

        if movies.is_empty() {
            debug!(page, "now playing exhausted");
            self.feed.has_more = false;
            return;
        }
        self.feed.append(&movies);
        for movie in movies {
            self.cache.upsert(movie);
        }
    }

    fn on_search_loaded(&mut self, query: String, result: Result<Vec<Movie>, ApiError>) {
        let movies = match result {
            Ok(movies) => movies,
            Err(error) => return self.record_failure(FetchKind::Search, error),
        };
        self.clear_failure(FetchKind::Search);
        debug!(query = %query, count = movies.len(), "search applied");

        self.search.ids = movies.iter().map(|m| m.id).collect();
        for movie in movies {
            self.cache.upsert(movie);
        }
    }

    fn on_detail_loaded(&mut self, id: MovieId, result: Result<Movie, ApiError>) {
        match result {
            Ok(movie) => {
                self.clear_failure(FetchKind::Detail);
                self.cache.upsert(movie);
            }
            Err(error) => {
                warn!(id, "detail lookup failed");
                self.record_failure(FetchKind::Detail, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 5.0,
            release_date: String::from("2024-01-01"),
            details: None,
        }
    }

    fn loaded(page: u32, ids: &[MovieId]) -> Action {
        Action::NowPlayingLoaded {
            page,
            result: Ok(ids.iter().copied().map(movie).collect()),
        }
    }

    #[test]
    fn start_requests_first_page() {
        let (session, effect) = Session::start();
        assert_eq!(effect, Effect::FetchNowPlaying { page: 1 });
        assert_eq!(session.view(), View::NowPlaying);
        assert!(session.is_loading());
    }

    #[test]
    fn load_more_dedups_overlapping_pages() {
        let (mut session, _) = Session::start();
        session.update(loaded(1, &[1, 2]));
        assert_eq!(
            session.update(Action::LoadMore),
            Some(Effect::FetchNowPlaying { page: 2 })
        );
        session.update(loaded(2, &[2, 3]));

        assert_eq!(session.feed().ids, vec![1, 2, 3]);
        assert_eq!(session.feed().page, 2);
        assert!(!session.is_loading());
    }

    #[test]
    fn empty_page_ends_feed() {
        let (mut session, _) = Session::start();
        session.update(loaded(1, &[1]));
        session.update(Action::LoadMore);
        session.update(loaded(2, &[]));

        assert!(!session.feed().has_more);
        assert_eq!(session.feed().ids, vec![1]);
        assert_eq!(session.update(Action::LoadMore), None);
    }

    #[test]
    fn failed_page_leaves_state_untouched() {
        let (mut session, _) = Session::start();
        session.update(loaded(1, &[1, 2]));
        session.update(Action::LoadMore);
        let before = session.feed().clone();

        session.update(Action::NowPlayingLoaded {
            page: 2,
            result: Err(ApiError::Network(String::from("offline"))),
        });

        assert_eq!(session.feed(), &before);
        assert_eq!(session.cache().len(), 2);
        let failure = session.failure().unwrap();
        assert_eq!(failure.kind, FetchKind::NowPlaying);
        assert_eq!(failure.user_message(), "Failed to load movies.");
    }

    #[test]
    fn failure_cleared_only_by_same_kind() {
        let (mut session, _) = Session::start();
        session.update(Action::NowPlayingLoaded {
            page: 1,
            result: Err(ApiError::RateLimit),
        });
        session.update(Action::SearchLoaded {
            query: String::from("x"),
            result: Ok(vec![movie(9)]),
        });
        assert!(session.failure().is_some());

        session.update(Action::LoadMore);
        session.update(loaded(2, &[4]));
        assert!(session.failure().is_none());
    }

    #[test]
    fn search_failure_does_not_hide_feed_failure() {
        let (mut session, _) = Session::start();
        session.update(Action::NowPlayingLoaded {
            page: 1,
            result: Err(ApiError::RateLimit),
        });
        session.update(Action::SearchLoaded {
            query: String::from("x"),
            result: Err(ApiError::Unauthorized),
        });
        assert_eq!(session.failure().map(|f| f.kind), Some(FetchKind::Search));

        session.update(Action::SearchLoaded {
            query: String::from("x"),
            result: Ok(Vec::new()),
        });
        assert_eq!(
            session.failure().map(|f| f.kind),
            Some(FetchKind::NowPlaying)
        );
        assert!(session.failure_of(FetchKind::Search).is_none());
    }

    #[test]
    fn blank_search_issues_no_request() {
        let (mut session, _) = Session::start();
        session.update(Action::SearchInputChanged(String::from("   ")));
        assert_eq!(session.update(Action::SubmitSearch), None);
        assert_eq!(session.view(), View::NowPlaying);
    }

    #[test]
    fn search_replaces_results_wholesale() {
        let (mut session, _) = Session::start();
        session.update(Action::SearchInputChanged(String::from(" dune ")));
        assert_eq!(
            session.update(Action::SubmitSearch),
            Some(Effect::Search {
                query: String::from("dune")
            })
        );
        assert_eq!(session.view(), View::Search);

        session.update(Action::SearchLoaded {
            query: String::from("dune"),
            result: Ok(vec![movie(1), movie(2)]),
        });
        session.update(Action::SearchLoaded {
            query: String::from("heat"),
            result: Ok(vec![movie(3)]),
        });
        assert_eq!(session.search_results().ids, vec![3]);
        assert!(session.cache().contains(1));
    }

    #[test]
    fn clearing_input_clears_results() {
        let (mut session, _) = Session::start();
        session.update(Action::SearchInputChanged(String::from("x")));
        session.update(Action::SubmitSearch);
        session.update(Action::SearchLoaded {
            query: String::from("x"),
            result: Ok(vec![movie(1)]),
        });
        session.update(Action::SearchInputChanged(String::new()));
        assert_eq!(session.search_results(), &SearchResults::default());
    }

    #[test]
    fn returning_to_now_playing_restarts_feed() {
        let (mut session, _) = Session::start();
        session.update(loaded(1, &[1, 2]));
        session.update(Action::LoadMore);
        session.update(loaded(2, &[3]));

        assert_eq!(session.update(Action::Navigate(View::Favorites)), None);
        assert_eq!(
            session.update(Action::Navigate(View::NowPlaying)),
            Some(Effect::FetchNowPlaying { page: 1 })
        );
        assert!(session.feed().ids.is_empty());
        assert_eq!(session.feed().page, 1);
        assert!(session.feed().has_more);
    }

    #[test]
    fn reentering_current_view_is_noop() {
        let (mut session, _) = Session::start();
        session.update(loaded(1, &[1, 2]));
        assert_eq!(session.update(Action::Navigate(View::NowPlaying)), None);
        assert_eq!(session.feed().ids, vec![1, 2]);
    }

    #[test]
    fn entering_search_clears_previous_query() {
        let (mut session, _) = Session::start();
        session.update(Action::SearchInputChanged(String::from("alien")));
        session.update(Action::SubmitSearch);
        session.update(Action::SearchLoaded {
            query: String::from("alien"),
            result: Ok(vec![movie(1)]),
        });
        session.update(Action::Navigate(View::Watched));
        session.update(Action::Navigate(View::Search));

        assert_eq!(session.search_results(), &SearchResults::default());
        assert_eq!(session.search_input(), "");
    }

    #[test]
    fn clear_restarts_feed_even_when_active() {
        let (mut session, _) = Session::start();
        session.update(loaded(1, &[1]));
        session.update(Action::SearchInputChanged(String::from("q")));
        assert_eq!(
            session.update(Action::Clear),
            Some(Effect::FetchNowPlaying { page: 1 })
        );
        assert!(session.feed().ids.is_empty());
        assert_eq!(session.search_input(), "");
    }

    #[test]
    fn favorite_toggle_does_not_need_cache_entry() {
        let (mut session, _) = Session::start();
        session.update(Action::ToggleFavorite(42));
        assert!(session.favorites().contains(42));
        assert!(!session.cache().contains(42));
        session.update(Action::ToggleFavorite(42));
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn detail_upgrades_cache_entry() {
        let (mut session, _) = Session::start();
        session.update(loaded(1, &[7]));
        assert_eq!(
            session.update(Action::OpenDetail(7)),
            Some(Effect::FetchDetail { id: 7 })
        );
        assert!(session.is_detail_pending(7));
        let mut full = movie(7);
        full.details = Some(crate::media::MovieDetails {
            runtime: Some(120),
            genres: vec![String::from("Drama")],
            trailer_key: Some(String::from("key")),
        });
        session.update(Action::DetailLoaded {
            id: 7,
            result: Ok(full),
        });
        assert_eq!(session.cache().get(7).unwrap().trailer_key(), Some("key"));
        assert!(!session.is_detail_pending(7));

        session.update(loaded(1, &[7]));
        assert!(session.cache().get(7).unwrap().is_full());

        session.update(Action::CloseDetail);
        assert_eq!(session.selected(), None);
    }
}
