use iced::Task;
use tracing::{debug, warn};

use flixster::media::Movie;
use flixster::orchestrator;
use flixster::session::{Action, Effect};
use flixster::tmdb::{fetch_image_bytes, image_url, ImageSize};
use flixster::video::youtube_url;

use crate::ui::Message;
use crate::Flixster;

pub fn handle_message(app: &mut Flixster, message: Message) -> Task<Message> {
    match message {
        Message::Setup(_) => Task::none(),
        Message::Navigate(view) => dispatch(app, Action::Navigate(view)),
        Message::SearchQueryChanged(query) => dispatch(app, Action::SearchInputChanged(query)),
        Message::SearchSubmit => dispatch(app, Action::SubmitSearch),
        Message::ClearSearch => dispatch(app, Action::Clear),
        Message::LoadMore => dispatch(app, Action::LoadMore),
        Message::SetSort(key) => dispatch(app, Action::SetSort(key)),
        Message::ToggleFavorite(id) => dispatch(app, Action::ToggleFavorite(id)),
        Message::ToggleWatched(id) => dispatch(app, Action::ToggleWatched(id)),
        Message::OpenDetail(id) => {
            let backdrop = load_backdrop(app, id);
            Task::batch([dispatch(app, Action::OpenDetail(id)), backdrop])
        }
        Message::CloseDetail => dispatch(app, Action::CloseDetail),
        Message::NowPlayingLoaded(page, result) => {
            let posters = load_posters(app, result.as_deref().unwrap_or_default());
            Task::batch([dispatch(app, Action::NowPlayingLoaded { page, result }), posters])
        }
        Message::SearchResultsLoaded(query, result) => {
            let posters = load_posters(app, result.as_deref().unwrap_or_default());
            Task::batch([dispatch(app, Action::SearchLoaded { query, result }), posters])
        }
        Message::DetailLoaded(id, result) => {
            let task = dispatch(app, Action::DetailLoaded { id, result });
            Task::batch([task, load_backdrop(app, id)])
        }
        Message::PlayTrailer(key) => handle_play_trailer(&key),
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
    }
}

/// Feeds an action through the session and starts whatever request it asks for.
pub fn dispatch(app: &mut Flixster, action: Action) -> Task<Message> {
    match app.session.update(action) {
        Some(effect) => perform(app, effect),
        None => Task::none(),
    }
}

pub fn perform(app: &Flixster, effect: Effect) -> Task<Message> {
    let Some(api) = &app.api else {
        return Task::none();
    };
    let api = api.clone();

    match effect {
        Effect::FetchNowPlaying { page } => Task::perform(
            orchestrator::load_now_playing(api, page),
            move |result| Message::NowPlayingLoaded(page, result),
        ),
        Effect::Search { query } => {
            let submitted = query.clone();
            Task::perform(orchestrator::search(api, query), move |result| {
                Message::SearchResultsLoaded(submitted, result)
            })
        }
        Effect::FetchDetail { id } => Task::perform(orchestrator::load_detail(api, id), move |result| {
            Message::DetailLoaded(id, result)
        }),
    }
}

fn load_posters(app: &Flixster, movies: &[Movie]) -> Task<Message> {
    let tasks: Vec<Task<Message>> = movies
        .iter()
        .filter_map(|movie| movie.poster_path.as_deref())
        .map(|path| image_url(path, ImageSize::Poster))
        .filter(|url| app.image_cache.needs(url))
        .map(|url| Task::done(Message::LoadImage(url)))
        .collect();
    Task::batch(tasks)
}

fn load_backdrop(app: &Flixster, id: flixster::media::MovieId) -> Task<Message> {
    let Some(path) = app
        .session
        .cache()
        .get(id)
        .and_then(|movie| movie.backdrop_path.as_deref())
    else {
        return Task::none();
    };
    let url = image_url(path, ImageSize::Original);
    if !app.image_cache.needs(&url) {
        return Task::none();
    }
    Task::done(Message::LoadImage(url))
}

fn handle_load_image(app: &mut Flixster, url: String) -> Task<Message> {
    if !app.image_cache.needs(&url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());
    let image_url = url.clone();

    Task::perform(fetch_image_bytes(image_url), move |result| {
        Message::ImageLoaded(url, result.map(iced::widget::image::Handle::from_bytes))
    })
}

fn handle_image_loaded(
    app: &mut Flixster,
    url: String,
    result: Result<iced::widget::image::Handle, String>,
) -> Task<Message> {
    match result {
        Ok(handle) => app.image_cache.insert(url, handle),
        Err(error) => {
            debug!(url = %url, error = %error, "image download failed");
            app.image_cache.clear_pending(&url);
        }
    }
    Task::none()
}

fn handle_play_trailer(key: &str) -> Task<Message> {
    let url = youtube_url(key);
    if let Err(e) = open::that_detached(&url) {
        warn!(url = %url, error = %e, "could not open trailer in browser");
    }
    Task::none()
}
