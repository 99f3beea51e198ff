//! Bag-of-words count vectorization over a shared vocabulary.
//!
//! ## Algorithm
//!
//! 1. Tokenize every document: lowercase alphanumeric runs, two characters
//!    or longer, minus English stop words
//! 2. Count total term frequency across the corpus
//! 3. Keep the most frequent terms up to the vocabulary cap
//! 4. Assign each kept term a dense column index
//!
//! Transforming then maps a document to a vector of term counts over those
//! columns. Terms never seen during fitting are ignored.

use crate::stopwords;
use std::collections::HashMap;

/// Default cap on vocabulary size
pub const DEFAULT_MAX_FEATURES: usize = 10_000;

/// Tokens shorter than this never enter the vocabulary
const MIN_TOKEN_LEN: usize = 2;

/// Lowercase alphanumeric tokens of a document, stop words removed
fn tokenize(document: &str) -> impl Iterator<Item = String> + '_ {
    document
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .filter(|token| !stopwords::is_stop_word(token))
}

/// Learns a capped vocabulary from a corpus and turns documents into count
/// vectors over it.
///
/// Fitting cannot fail: an empty or all-stop-word corpus just produces an
/// empty vocabulary, and every transform over it is the empty vector.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
    max_features: usize,
}

impl CountVectorizer {
    /// Creates an unfitted vectorizer with the default vocabulary cap
    pub fn new() -> Self {
        Self {
            vocabulary: HashMap::new(),
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    /// Set the maximum vocabulary size (builder pattern)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Learn the vocabulary from a corpus, replacing any previous fit.
    ///
    /// When more distinct terms exist than the cap allows, the most frequent
    /// terms win; equal frequencies break alphabetically so the vocabulary
    /// is deterministic for a given corpus.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        // Count total term frequency across the corpus
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        for document in documents {
            for token in tokenize(document.as_ref()) {
                *term_freq.entry(token).or_insert(0) += 1;
            }
        }

        // Sort by frequency and apply the vocabulary cap
        let mut sorted_terms: Vec<(String, usize)> = term_freq.into_iter().collect();
        sorted_terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted_terms.truncate(self.max_features);

        // Build the term -> column mapping
        self.vocabulary = sorted_terms
            .into_iter()
            .enumerate()
            .map(|(column, (term, _))| (term, column))
            .collect();
    }

    /// Transform a document into a count vector over the learned vocabulary.
    ///
    /// # Returns
    /// One count per vocabulary column; the empty vector when unfitted or
    /// fitted on an empty corpus
    pub fn transform(&self, document: &str) -> Vec<f32> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        for token in tokenize(document) {
            if let Some(&column) = self.vocabulary.get(&token) {
                counts[column] += 1.0;
            }
        }
        counts
    }

    /// Get the learned vocabulary
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Number of terms in the learned vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
