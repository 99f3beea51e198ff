//! The in-memory movie catalog.
//!
//! `Catalog` keeps movies in insertion order (the recommender's tie-breaking
//! depends on a stable iteration order) and layers two indices on top: id
//! lookup and create-or-update by title.

use crate::types::{AttrValue, Attributes, Movie, MovieId};
use std::collections::HashMap;

/// Lowercased title used as the create-or-update key, if the record has one
fn title_key(attributes: &Attributes) -> Option<String> {
    attributes
        .get("title")
        .and_then(AttrValue::as_text)
        .map(str::to_lowercase)
}

/// Holds all movies plus indices for id and title lookups.
///
/// The `movies` vector is the source of truth; both indices store positions
/// into it. Updates replace attribute maps in place so a movie keeps its id
/// and its position for the life of the catalog.
#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    by_id: HashMap<MovieId, usize>,
    by_title: HashMap<String, usize>,
    next_id: MovieId,
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            by_id: HashMap::new(),
            by_title: HashMap::new(),
            next_id: 1,
        }
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get a movie by id
    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.by_id.get(&id).map(|&position| &self.movies[position])
    }

    /// All movies, in insertion order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Iterate over movies in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    /// Insert a movie with an explicit id.
    ///
    /// An existing id is replaced in place, keeping its position. Newly seen
    /// ids reserve the id space above them for subsequent [`Catalog::upsert`]
    /// calls.
    pub fn insert(&mut self, movie: Movie) {
        let new_key = title_key(&movie.attributes);
        match self.by_id.get(&movie.id) {
            Some(&position) => {
                if let Some(old_key) = title_key(&self.movies[position].attributes) {
                    if new_key.as_deref() != Some(old_key.as_str()) {
                        self.by_title.remove(&old_key);
                    }
                }
                if let Some(key) = new_key {
                    self.by_title.insert(key, position);
                }
                self.movies[position] = movie;
            }
            None => {
                let position = self.movies.len();
                self.by_id.insert(movie.id, position);
                if let Some(key) = new_key {
                    self.by_title.insert(key, position);
                }
                self.next_id = self.next_id.max(movie.id.saturating_add(1));
                self.movies.push(movie);
            }
        }
    }

    /// Create or update a movie from an attribute map, keyed by title.
    ///
    /// A known title keeps its id and position and gets the new attributes;
    /// an unknown title is appended with the next sequential id. Records
    /// without a title always append. Returns the movie's id and whether it
    /// was newly created.
    pub fn upsert(&mut self, attributes: Attributes) -> (MovieId, bool) {
        let key = title_key(&attributes);
        if let Some(key) = &key {
            if let Some(&position) = self.by_title.get(key) {
                let id = self.movies[position].id;
                self.movies[position].attributes = attributes;
                return (id, false);
            }
        }

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        let position = self.movies.len();
        self.by_id.insert(id, position);
        if let Some(key) = key {
            self.by_title.insert(key, position);
        }
        self.movies.push(Movie::new(id, attributes));
        (id, true)
    }

    /// Case-insensitive title substring search, in catalog order
    pub fn search_title(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.title().to_lowercase().contains(&needle))
            .collect()
    }
}
