//! The recommendation engine: shared-vocabulary scoring and ranking.
//!
//! ## Algorithm
//!
//! 1. Flatten every catalog movie into a lowercase document
//! 2. Flatten the user's preference map the same way
//! 3. Fit one vectorizer over all of it, so items and user share a term space
//! 4. Transform each movie and the user into count vectors
//! 5. Score each movie against the user with cosine similarity
//! 6. Sort by score, descending; equal scores keep catalog order
//! 7. Drop movies from the watch history
//! 8. Truncate to the requested count
//!
//! The whole catalog participates in fitting, watched movies included; the
//! watch history only removes rows from the ranked result. Every input is
//! acceptable: empty catalogs, empty preference maps and all-stop-word
//! documents rank with zero scores instead of failing.

use catalog::{Movie, MovieId};
use profile::UserPreferences;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, instrument};

use crate::similarity::cosine_similarity;
use crate::text::combine_attributes;
use crate::vectorizer::{CountVectorizer, DEFAULT_MAX_FEATURES};

/// Default number of recommendations returned
pub const DEFAULT_TOP_N: usize = 10;

/// A ranked movie together with its similarity score
#[derive(Debug, Clone, Copy)]
pub struct ScoredMovie<'a> {
    pub movie: &'a Movie,
    pub score: f32,
}

/// Presentation form of a ranked movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title().to_string(),
        }
    }
}

/// Reduce ranked movies to their presentation form
pub fn summarize<'a, I>(ranked: I) -> Vec<MovieSummary>
where
    I: IntoIterator<Item = &'a Movie>,
{
    ranked.into_iter().map(MovieSummary::from).collect()
}

/// Content-based recommender over a movie catalog.
///
/// Stateless between calls: each request fits a fresh vocabulary over the
/// catalog it is handed, so concurrent calls never share mutable state.
///
/// ## Usage
/// ```ignore
/// let recommender = Recommender::new();
/// let ranked = recommender.recommend(&prefs, catalog.movies(), 10);
/// for movie in ranked {
///     println!("{}", movie.title());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Recommender {
    vocabulary_limit: usize,
}

impl Recommender {
    /// Creates a recommender with the default vocabulary cap
    pub fn new() -> Self {
        Self {
            vocabulary_limit: DEFAULT_MAX_FEATURES,
        }
    }

    /// Set the vocabulary cap (builder pattern)
    pub fn with_vocabulary_limit(mut self, limit: usize) -> Self {
        self.vocabulary_limit = limit;
        self
    }

    /// Rank the catalog against a user profile.
    ///
    /// # Arguments
    /// * `preferences` - The user's taste profile and watch history
    /// * `movies` - The catalog slice to rank
    /// * `top_n` - Maximum number of movies to return
    ///
    /// # Returns
    /// At most `top_n` movies, most similar first, watched movies excluded
    pub fn recommend<'a>(
        &self,
        preferences: &UserPreferences,
        movies: &'a [Movie],
        top_n: usize,
    ) -> Vec<&'a Movie> {
        self.recommend_scored(preferences, movies, top_n)
            .into_iter()
            .map(|scored| scored.movie)
            .collect()
    }

    /// Rank the catalog against a user profile, keeping scores.
    #[instrument(skip_all, fields(movies = movies.len(), top_n))]
    pub fn recommend_scored<'a>(
        &self,
        preferences: &UserPreferences,
        movies: &'a [Movie],
        top_n: usize,
    ) -> Vec<ScoredMovie<'a>> {
        // Flatten both sides into documents
        let item_documents: Vec<String> = movies
            .iter()
            .map(|movie| combine_attributes(&movie.attributes))
            .collect();
        let user_document = combine_attributes(&preferences.preferences);

        // One fit over items plus the user, so both sides share a term space
        let mut vectorizer = CountVectorizer::new().with_max_features(self.vocabulary_limit);
        let mut corpus: Vec<&str> = item_documents.iter().map(String::as_str).collect();
        corpus.push(user_document.as_str());
        vectorizer.fit(&corpus);
        debug!(
            vocabulary = vectorizer.vocabulary_size(),
            "fitted shared vocabulary"
        );

        // Score every movie against the user vector in parallel
        let user_vector = vectorizer.transform(&user_document);
        let mut scored: Vec<ScoredMovie<'a>> = movies
            .par_iter()
            .zip(item_documents.par_iter())
            .map(|(movie, document)| ScoredMovie {
                movie,
                score: cosine_similarity(&vectorizer.transform(document), &user_vector),
            })
            .collect();

        // Stable sort: equal scores keep catalog order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        // Watched movies drop out of the ranking, then the cut happens
        scored.retain(|entry| !preferences.has_watched(entry.movie.id));
        scored.truncate(top_n);

        debug!(returned = scored.len(), "ranking complete");
        scored
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Attributes;

    // =========================================================================
    // Test fixtures
    // =========================================================================

    fn movie(id: MovieId, title: &str, genres: Vec<&str>) -> Movie {
        let mut attributes = Attributes::new();
        attributes.set("title", title);
        attributes.set("genres", genres);
        Movie::new(id, attributes)
    }

    fn action_prefs() -> UserPreferences {
        let mut prefs = UserPreferences::new();
        prefs.add_preference("genre", "Action");
        prefs
    }

    // =========================================================================
    // Ranking behavior
    // =========================================================================

    #[test]
    fn test_matching_genre_ranks_first() {
        let movies = vec![
            movie(1, "Heat", vec!["Action"]),
            movie(2, "Before Sunrise", vec!["Romance"]),
        ];

        let ranked = Recommender::new().recommend_scored(&action_prefs(), &movies, 10);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].movie.id, 1);
        assert_eq!(ranked[1].movie.id, 2);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_watched_movies_are_excluded() {
        let movies = vec![
            movie(1, "Heat", vec!["Action"]),
            movie(2, "Ronin", vec!["Action"]),
        ];
        let mut prefs = action_prefs();
        prefs.record_watch(1);

        let ranked = Recommender::new().recommend(&prefs, &movies, 10);
        let ids: Vec<MovieId> = ranked.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_all_watched_returns_empty() {
        let movies = vec![
            movie(1, "Heat", vec!["Action"]),
            movie(2, "Ronin", vec!["Action"]),
        ];
        let mut prefs = action_prefs();
        prefs.record_watch(1);
        prefs.record_watch(2);

        assert!(Recommender::new().recommend(&prefs, &movies, 10).is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // Identical attribute maps score identically
        let movies = vec![
            movie(5, "Clone A", vec!["Action"]),
            movie(3, "Clone B", vec!["Action"]),
            movie(9, "Clone C", vec!["Action"]),
        ];

        let ranked = Recommender::new().recommend(&action_prefs(), &movies, 10);
        let ids: Vec<MovieId> = ranked.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_top_n_truncates_the_ranking() {
        let movies: Vec<Movie> = (1..=8)
            .map(|id| movie(id, "Clone", vec!["Action"]))
            .collect();

        let ranked = Recommender::new().recommend(&action_prefs(), &movies, 3);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_zero_top_n_returns_empty() {
        let movies = vec![movie(1, "Heat", vec!["Action"])];
        assert!(Recommender::new().recommend(&action_prefs(), &movies, 0).is_empty());
    }

    // =========================================================================
    // Degenerate inputs
    // =========================================================================

    #[test]
    fn test_empty_catalog_returns_empty() {
        let ranked = Recommender::new().recommend(&action_prefs(), &[], 10);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_empty_preferences_rank_in_catalog_order() {
        let movies = vec![
            movie(1, "Heat", vec!["Action"]),
            movie(2, "Before Sunrise", vec!["Romance"]),
        ];

        let ranked = Recommender::new().recommend_scored(&UserPreferences::new(), &movies, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].movie.id, 1);
        assert_eq!(ranked[0].score, 0.0);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_movie_without_attributes_scores_zero_but_ranks() {
        let movies = vec![
            movie(1, "Heat", vec!["Action"]),
            Movie::new(2, Attributes::new()),
        ];

        let ranked = Recommender::new().recommend_scored(&action_prefs(), &movies, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].movie.id, 2);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_recommend_matches_scored_variant() {
        let movies = vec![
            movie(1, "Heat", vec!["Action"]),
            movie(2, "Before Sunrise", vec!["Romance"]),
            movie(3, "Ronin", vec!["Action"]),
        ];
        let prefs = action_prefs();
        let recommender = Recommender::new();

        let plain: Vec<MovieId> = recommender
            .recommend(&prefs, &movies, 10)
            .iter()
            .map(|m| m.id)
            .collect();
        let scored: Vec<MovieId> = recommender
            .recommend_scored(&prefs, &movies, 10)
            .iter()
            .map(|s| s.movie.id)
            .collect();
        assert_eq!(plain, scored);
    }

    #[test]
    fn test_tiny_vocabulary_limit_still_ranks() {
        let movies = vec![
            movie(1, "Heat", vec!["Action", "Crime", "Thriller"]),
            movie(2, "Before Sunrise", vec!["Romance", "Drama"]),
        ];

        let recommender = Recommender::new().with_vocabulary_limit(1);
        let ranked = recommender.recommend(&action_prefs(), &movies, 10);
        assert_eq!(ranked.len(), 2);
    }

    // =========================================================================
    // Summaries
    // =========================================================================

    #[test]
    fn test_summaries_carry_id_and_title() {
        let movies = vec![movie(7, "Heat", vec!["Action"])];
        let ranked = Recommender::new().recommend(&action_prefs(), &movies, 10);

        let summaries = summarize(ranked);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, 7);
        assert_eq!(summaries[0].title, "Heat");
    }

    #[test]
    fn test_summary_title_falls_back_to_placeholder() {
        let untitled = Movie::new(3, Attributes::new());
        let summary = MovieSummary::from(&untitled);
        assert_eq!(summary.title, "Untitled");
    }

    #[test]
    fn test_summary_serializes_to_id_and_title() {
        let summary = MovieSummary {
            id: 1,
            title: "Heat".to_string(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "title": "Heat"}));
    }
}
