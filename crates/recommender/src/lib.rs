//! # Recommender Crate
//!
//! Content-based movie recommendations: flatten attribute maps into text,
//! vectorize everything over one shared vocabulary, rank by cosine
//! similarity against the user's preference profile.
//!
//! ## Main Components
//!
//! - **engine**: The recommendation pipeline (fit, score, rank, filter)
//! - **text**: Attribute map flattening into documents
//! - **vectorizer**: Bag-of-words counting with a capped vocabulary
//! - **similarity**: Cosine similarity over count vectors
//! - **stopwords**: The English stop word inventory
//!
//! ## Example Usage
//!
//! ```ignore
//! use profile::UserPreferences;
//! use recommender::Recommender;
//!
//! let mut prefs = UserPreferences::new();
//! prefs.add_preference("genre", "Action");
//! prefs.add_preference("director", "James Cameron");
//!
//! let recommender = Recommender::new();
//! for movie in recommender.recommend(&prefs, catalog.movies(), 10) {
//!     println!("{}: {}", movie.id, movie.title());
//! }
//! ```

// Public modules
pub mod engine;
pub mod similarity;
pub mod stopwords;
pub mod text;
pub mod vectorizer;

// Re-export commonly used items for convenience
pub use engine::{DEFAULT_TOP_N, MovieSummary, Recommender, ScoredMovie, summarize};
pub use similarity::cosine_similarity;
pub use text::combine_attributes;
pub use vectorizer::{CountVectorizer, DEFAULT_MAX_FEATURES};
