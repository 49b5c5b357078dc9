use std::collections::HashMap;

use crate::media::{Movie, MovieId};

/// Session-lifetime store of the most complete record known for each movie.
/// Entries are merged, never removed.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    movies: HashMap<MovieId, Movie>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, movie: Movie) {
        match self.movies.get_mut(&movie.id) {
            Some(existing) => existing.merge(movie),
            None => {
                self.movies.insert(movie.id, movie);
            }
        }
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Resolves ids in order, skipping any that were never cached.
    pub fn project<'a, I>(&'a self, ids: I) -> Vec<&'a Movie>
    where
        I: IntoIterator<Item = MovieId>,
    {
        ids.into_iter().filter_map(|id| self.movies.get(&id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MovieDetails;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            release_date: String::new(),
            details: None,
        }
    }

    #[test]
    fn full_entry_is_never_downgraded() {
        let mut cache = EntityCache::new();
        let mut full = movie(1, "Alien");
        full.details = Some(MovieDetails {
            runtime: Some(117),
            ..Default::default()
        });
        cache.upsert(full);
        cache.upsert(movie(1, "Alien"));

        let cached = cache.get(1).unwrap();
        assert!(cached.is_full());
        assert_eq!(cached.runtime(), Some(117));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn projection_skips_unknown_ids_and_keeps_order() {
        let mut cache = EntityCache::new();
        cache.upsert(movie(3, "C"));
        cache.upsert(movie(1, "A"));

        let titles: Vec<&str> = cache
            .project([3, 42, 1])
            .into_iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["C", "A"]);
        assert!(!cache.contains(42));
    }
}
