use std::collections::{HashMap, HashSet};

use iced::widget::image::Handle;
use iced::widget::text;
use iced::Color;

use flixster::media::{ApiError, Movie, MovieId};
use flixster::session::View;
use flixster::sort::SortKey;

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const ACCENT_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const WATCHED_GREEN: Color = Color::from_rgb(0.18, 0.72, 0.35);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

pub const ICON_X_LG: char = '\u{F659}';
pub const ICON_PLAY_FILL: char = '\u{F4F4}';
pub const ICON_FILM: char = '\u{F3A9}';
pub const ICON_SEARCH: char = '\u{F52A}';
pub const ICON_STAR_FILL: char = '\u{F586}';
pub const ICON_HEART: char = '\u{F417}';
pub const ICON_HEART_FILL: char = '\u{F415}';
pub const ICON_EYE: char = '\u{F341}';
pub const ICON_CHECK_CIRCLE_FILL: char = '\u{F26A}';

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

/// Decoded poster and backdrop images for this run, keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }

    /// Forgets a failed download so a later render can ask again.
    pub fn clear_pending(&mut self, url: &str) {
        self.pending.remove(url);
    }

    pub fn needs(&self, url: &str) -> bool {
        self.get(url).is_none() && !self.is_pending(url)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Setup(crate::setup::SetupMessage),
    Navigate(View),
    SearchQueryChanged(String),
    SearchSubmit,
    ClearSearch,
    LoadMore,
    SetSort(SortKey),
    ToggleFavorite(MovieId),
    ToggleWatched(MovieId),
    OpenDetail(MovieId),
    CloseDetail,
    NowPlayingLoaded(u32, Result<Vec<Movie>, ApiError>),
    SearchResultsLoaded(String, Result<Vec<Movie>, ApiError>),
    DetailLoaded(MovieId, Result<Movie, ApiError>),
    PlayTrailer(String),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_urls_are_not_requested_twice() {
        let mut cache = ImageCache::new();
        let url = String::from("https://image.tmdb.org/t/p/w500/a.jpg");
        assert!(cache.needs(&url));

        cache.mark_pending(url.clone());
        assert!(!cache.needs(&url));

        cache.clear_pending(&url);
        assert!(cache.needs(&url));

        cache.insert(url.clone(), Handle::from_bytes(vec![0u8; 4]));
        assert!(!cache.needs(&url));
        assert!(!cache.is_pending(&url));
    }
}
