//! # Profile Crate
//!
//! The user's side of the recommender: a preference map shaped like a movie
//! attribute map, plus the set of movies already watched.
//!
//! Preferences reuse [`catalog::Attributes`] so the recommender can flatten
//! a user profile and a movie through the same code path. Categories are
//! free-form (`genre`, `director`, `actor`, whatever the caller likes) and
//! values accumulate into deduplicated lists.
//!
//! ## Example Usage
//!
//! ```ignore
//! use profile::UserPreferences;
//!
//! let mut prefs = UserPreferences::new();
//! prefs.add_preference("genre", "Action");
//! prefs.add_preference("director", "James Cameron");
//! prefs.record_watch(1);
//! ```

use catalog::{AttrValue, Attributes, MovieId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A user's taste profile and viewing history.
///
/// Both fields default when absent, so `{}` is a valid serialized profile.
/// Watch history is a set: recording the same movie twice is a no-op, and
/// membership checks are O(1) during ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Preference categories in insertion order
    #[serde(default)]
    pub preferences: Attributes,
    /// Ids of movies the user has already seen
    #[serde(default)]
    pub watch_history: HashSet<MovieId>,
}

impl UserPreferences {
    /// Creates an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a profile from an existing preference map
    pub fn with_preferences(preferences: Attributes) -> Self {
        Self {
            preferences,
            watch_history: HashSet::new(),
        }
    }

    /// Add one value to a preference category.
    ///
    /// A new category starts as a single-element list. An existing list
    /// appends the value unless it is already present. A scalar category
    /// is promoted to a list holding the old value and the new one.
    pub fn add_preference(&mut self, category: impl Into<String>, value: impl Into<String>) {
        let category = category.into();
        let value = value.into();

        let merged = match self.preferences.get(&category) {
            None => AttrValue::List(vec![value]),
            Some(AttrValue::List(items)) => {
                if items.iter().any(|existing| existing == &value) {
                    return;
                }
                let mut items = items.clone();
                items.push(value);
                AttrValue::List(items)
            }
            Some(scalar) => {
                let existing = scalar.to_string();
                if existing == value {
                    return;
                }
                AttrValue::List(vec![existing, value])
            }
        };
        self.preferences.set(category, merged);
    }

    /// Record a movie as watched
    pub fn record_watch(&mut self, id: MovieId) {
        self.watch_history.insert(id);
    }

    /// Whether the user has already watched a movie
    pub fn has_watched(&self, id: MovieId) -> bool {
        self.watch_history.contains(&id)
    }
}
