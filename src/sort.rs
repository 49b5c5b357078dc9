use std::cmp::Ordering;

use crate::media::Movie;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    Title,
    ReleaseDate,
    VoteAverage,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::None,
        SortKey::Title,
        SortKey::ReleaseDate,
        SortKey::VoteAverage,
    ];
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::None => write!(f, "Sort by..."),
            SortKey::Title => write!(f, "Title"),
            SortKey::ReleaseDate => write!(f, "Release Date"),
            SortKey::VoteAverage => write!(f, "Vote Average"),
        }
    }
}

fn by_title(a: &Movie, b: &Movie) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

// Newest first; undated movies sink to the end.
fn by_release_date(a: &Movie, b: &Movie) -> Ordering {
    match (a.release_date.is_empty(), b.release_date.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.release_date.cmp(&a.release_date),
    }
}

fn by_vote_average(a: &Movie, b: &Movie) -> Ordering {
    b.vote_average.total_cmp(&a.vote_average)
}

/// Returns a freshly ordered copy; the input slice is left as is.
pub fn sort_movies<'a>(movies: &[&'a Movie], key: SortKey) -> Vec<&'a Movie> {
    let mut sorted = movies.to_vec();
    match key {
        SortKey::None => {}
        SortKey::Title => sorted.sort_by(|a, b| by_title(a, b)),
        SortKey::ReleaseDate => sorted.sort_by(|a, b| by_release_date(a, b)),
        SortKey::VoteAverage => sorted.sort_by(|a, b| by_vote_average(a, b)),
    }
    sorted
}
