use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use flixster::media::{ApiError, Genre, Movie, MovieId, TmdbMovieDetails, TmdbMovieResult};
use flixster::orchestrator;
use flixster::session::{Action, Effect, FetchKind, Session, View};
use flixster::tmdb::MovieApi;
use flixster::video::TrailerVideo;

#[derive(Default)]
struct FakeTmdb {
    pages: HashMap<u32, Vec<MovieId>>,
    search: HashMap<String, Vec<MovieId>>,
    videos: HashMap<MovieId, Vec<TrailerVideo>>,
    fail_videos: bool,
    requests: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

fn result(id: MovieId) -> TmdbMovieResult {
    TmdbMovieResult {
        id,
        title: format!("Movie {id}"),
        overview: String::new(),
        poster_path: Some(format!("/{id}.jpg")),
        backdrop_path: None,
        vote_average: 6.5,
        release_date: Some(String::from("2024-05-01")),
    }
}

fn video(key: &str, video_type: &str, official: bool) -> TrailerVideo {
    TrailerVideo {
        key: key.to_string(),
        site: String::from("YouTube"),
        video_type: video_type.to_string(),
        official,
    }
}

#[async_trait::async_trait]
impl MovieApi for FakeTmdb {
    async fn now_playing(&self, page: u32) -> Result<Vec<Movie>, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let ids = self.pages.get(&page).cloned().unwrap_or_default();
        Ok(ids.into_iter().map(|id| Movie::from(result(id))).collect())
    }

    async fn search_movies(&self, query: &str, _page: u32) -> Result<Vec<Movie>, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        let ids = self.search.get(query).cloned().unwrap_or_default();
        Ok(ids.into_iter().map(|id| Movie::from(result(id))).collect())
    }

    async fn movie_details(&self, id: MovieId) -> Result<TmdbMovieDetails, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(TmdbMovieDetails {
            movie: result(id),
            runtime: Some(101),
            genres: vec![Genre {
                id: 28,
                name: String::from("Action"),
            }],
        })
    }

    async fn movie_videos(&self, id: MovieId) -> Result<Vec<TrailerVideo>, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_videos {
            return Err(ApiError::Network(String::from("connection reset")));
        }
        Ok(self.videos.get(&id).cloned().unwrap_or_default())
    }
}

/// Runs effects to completion the way the window's task loop does.
async fn drive(session: &mut Session, api: &Arc<FakeTmdb>, effect: Option<Effect>) {
    let mut next = effect;
    while let Some(effect) = next.take() {
        let api: Arc<dyn MovieApi> = api.clone();
        let action = match effect {
            Effect::FetchNowPlaying { page } => Action::NowPlayingLoaded {
                page,
                result: orchestrator::load_now_playing(api, page).await,
            },
            Effect::Search { query } => Action::SearchLoaded {
                result: orchestrator::search(api, query.clone()).await,
                query,
            },
            Effect::FetchDetail { id } => Action::DetailLoaded {
                id,
                result: orchestrator::load_detail(api, id).await,
            },
        };
        next = session.update(action);
    }
}

#[tokio::test]
async fn paging_merges_overlapping_pages_without_duplicates() {
    let api = Arc::new(FakeTmdb {
        pages: HashMap::from([(1, vec![1, 2]), (2, vec![2, 3]), (3, vec![3, 4, 5])]),
        ..Default::default()
    });
    let (mut session, effect) = Session::start();
    drive(&mut session, &api, Some(effect)).await;
    for _ in 0..2 {
        let effect = session.update(Action::LoadMore);
        drive(&mut session, &api, effect).await;
    }

    assert_eq!(session.feed().ids, vec![1, 2, 3, 4, 5]);
    let unique: HashSet<MovieId> = session.feed().ids.iter().copied().collect();
    assert_eq!(unique.len(), session.feed().ids.len());

    let effect = session.update(Action::LoadMore);
    drive(&mut session, &api, effect).await;
    assert!(!session.feed().has_more);
    assert_eq!(session.update(Action::LoadMore), None);
    assert_eq!(api.requests.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn blank_search_never_reaches_the_api() {
    let api = Arc::new(FakeTmdb::default());
    let results = orchestrator::search(api.clone(), String::from("   ")).await;
    assert_eq!(results, Ok(Vec::new()));
    assert_eq!(api.requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn search_then_favorite_then_browse_favorites() {
    let api = Arc::new(FakeTmdb {
        pages: HashMap::from([(1, vec![1])]),
        search: HashMap::from([(String::from("heat"), vec![10, 11])]),
        ..Default::default()
    });
    let (mut session, effect) = Session::start();
    drive(&mut session, &api, Some(effect)).await;

    session.update(Action::SearchInputChanged(String::from("heat")));
    let effect = session.update(Action::SubmitSearch);
    drive(&mut session, &api, effect).await;
    assert_eq!(session.view(), View::Search);
    assert_eq!(session.search_results().ids, vec![10, 11]);
    assert_eq!(api.queries.lock().unwrap().as_slice(), ["heat"]);

    session.update(Action::ToggleFavorite(11));
    session.update(Action::ToggleWatched(11));
    session.update(Action::ToggleFavorite(77));
    session.update(Action::Navigate(View::Favorites));

    let vm = session.view_model();
    assert_eq!(vm.cards.len(), 1);
    assert_eq!(vm.cards[0].id, 11);
    assert!(vm.cards[0].watched);
}

#[tokio::test]
async fn detail_attaches_first_official_trailer() {
    let api = Arc::new(FakeTmdb {
        pages: HashMap::from([(1, vec![3])]),
        videos: HashMap::from([(
            3,
            vec![
                video("teaser", "Teaser", true),
                video("unofficial", "Trailer", false),
                video("official", "Trailer", true),
            ],
        )]),
        ..Default::default()
    });
    let (mut session, effect) = Session::start();
    drive(&mut session, &api, Some(effect)).await;

    let effect = session.update(Action::OpenDetail(3));
    drive(&mut session, &api, effect).await;

    let movie = session.cache().get(3).unwrap();
    assert!(movie.is_full());
    assert_eq!(movie.trailer_key(), Some("official"));
    assert_eq!(movie.runtime(), Some(101));

    let detail = session.view_model().detail.unwrap();
    assert_eq!(detail.genres_label.as_deref(), Some("Action"));
}

#[tokio::test]
async fn detail_fails_as_a_whole_when_videos_fail() {
    let api = Arc::new(FakeTmdb {
        pages: HashMap::from([(1, vec![3])]),
        fail_videos: true,
        ..Default::default()
    });
    let (mut session, effect) = Session::start();
    drive(&mut session, &api, Some(effect)).await;

    let effect = session.update(Action::OpenDetail(3));
    drive(&mut session, &api, effect).await;

    assert!(!session.cache().get(3).unwrap().is_full());
    let detail = session.view_model().detail.unwrap();
    assert!(!detail.loading);
    assert!(detail.error.is_some());
    assert_eq!(session.failure().map(|f| f.kind), Some(FetchKind::Detail));
    assert_eq!(
        session.view_model().error.as_deref(),
        Some("Failed to fetch movie details.")
    );
}
