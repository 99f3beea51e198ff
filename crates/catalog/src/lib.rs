//! # Catalog Crate
//!
//! Movie storage for the recommender: a schema-free, insertion-ordered
//! catalog plus file ingestion.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Attributes, AttrValue)
//! - **index**: The in-memory catalog with id and title lookups
//! - **ingest**: CSV/JSON file loading with validation
//! - **error**: Error types for loading and validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! // Load a catalog file (format detected from the extension)
//! let catalog = Catalog::load_path(Path::new("data/movies.csv"))?;
//!
//! for movie in catalog.iter() {
//!     println!("{}: {}", movie.id, movie.title());
//! }
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod ingest;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, MIN_RELEASE_YEAR, Result};
pub use index::Catalog;
pub use ingest::{FileFormat, ingest_file, load_records};
pub use types::{AttrValue, Attributes, Movie, MovieId, UNTITLED};
