//! Error types for the catalog crate.

use thiserror::Error;

/// Earliest release year accepted for a movie record.
///
/// Nothing in the catalog predates the first motion pictures.
pub const MIN_RELEASE_YEAR: i64 = 1888;

/// Errors that can occur while loading or validating catalog files
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File content type is neither CSV nor JSON
    #[error("Invalid file type: {path}")]
    InvalidFileType { path: String },

    /// CSV file couldn't be parsed
    #[error("CSV parse error in {path}: {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// JSON file couldn't be parsed
    #[error("JSON parse error in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record is missing a field the catalog requires
    #[error("Record {record} in {path} is missing required field: {field}")]
    MissingField {
        path: String,
        record: usize,
        field: String,
    },

    /// A record's release year falls outside the accepted range
    #[error(
        "Invalid release year {year} for '{title}': \
         the release year must be between {MIN_RELEASE_YEAR} and the current year"
    )]
    InvalidReleaseYear { title: String, year: i64 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
