//! Bulk catalog ingestion from CSV and JSON files.
//!
//! ## Formats
//!
//! - **CSV**: header-driven. Every column becomes an attribute named after
//!   its header; the `genres` column splits into a list on `|` (or commas
//!   when no pipe is present) and `release_year` parses to an integer.
//!   Empty cells are skipped.
//! - **JSON**: a top-level array of objects. Each object becomes an
//!   attribute map as-is, keeping its key order.
//!
//! Files are dispatched on the MIME type guessed from their extension;
//! anything that is neither CSV nor JSON is rejected.
//!
//! ## Validation
//!
//! Every record needs a non-empty `title`. When a record carries an integer
//! `release_year`, it must fall between 1888 and the current year.

use crate::error::{CatalogError, MIN_RELEASE_YEAR, Result};
use crate::index::Catalog;
use crate::types::{AttrValue, Attributes};
use chrono::Datelike;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Supported catalog file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Map a MIME content type to a format
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "text/csv" => Some(FileFormat::Csv),
            "application/json" => Some(FileFormat::Json),
            _ => None,
        }
    }

    /// Guess a file's format from the MIME type of its extension
    pub fn detect(path: &Path) -> Option<Self> {
        mime_guess::from_path(path)
            .first_raw()
            .and_then(Self::from_content_type)
    }
}

/// Columns whose CSV values become lists
const LIST_COLUMNS: &[&str] = &["genres"];

/// Split a list cell on `|`, falling back to commas
fn parse_list(field: &str) -> Vec<String> {
    let separator = if field.contains('|') { '|' } else { ',' };
    field
        .split(separator)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Interpret one CSV cell according to its column
fn csv_value(header: &str, field: &str) -> AttrValue {
    if LIST_COLUMNS.contains(&header) {
        AttrValue::List(parse_list(field))
    } else if header == "release_year" {
        field
            .parse::<i64>()
            .map(AttrValue::Int)
            .unwrap_or_else(|_| AttrValue::Text(field.to_string()))
    } else {
        AttrValue::Text(field.to_string())
    }
}

fn parse_csv(path: &Path) -> Result<Vec<Attributes>> {
    let csv_err = |source| CatalogError::CsvError {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        let mut attributes = Attributes::with_capacity(headers.len());
        for (header, field) in headers.iter().zip(row.iter()) {
            if field.is_empty() {
                continue;
            }
            attributes.set(header, csv_value(header, field));
        }
        records.push(attributes);
    }
    Ok(records)
}

fn parse_json(path: &Path) -> Result<Vec<Attributes>> {
    let file = File::open(path)?;
    let records = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        CatalogError::JsonError {
            path: path.display().to_string(),
            source,
        }
    })?;
    Ok(records)
}

fn validate_record(path: &Path, record: usize, attributes: &Attributes) -> Result<()> {
    let title = attributes
        .get("title")
        .and_then(AttrValue::as_text)
        .filter(|title| !title.is_empty());
    let Some(title) = title else {
        return Err(CatalogError::MissingField {
            path: path.display().to_string(),
            record,
            field: "title".to_string(),
        });
    };

    if let Some(year) = attributes.get("release_year").and_then(AttrValue::as_int) {
        let current_year = i64::from(chrono::Utc::now().year());
        if year < MIN_RELEASE_YEAR || year > current_year {
            return Err(CatalogError::InvalidReleaseYear {
                title: title.to_string(),
                year,
            });
        }
    }
    Ok(())
}

/// Parse and validate a catalog file, dispatching on its content type
pub fn load_records(path: &Path) -> Result<Vec<Attributes>> {
    let format = FileFormat::detect(path).ok_or_else(|| CatalogError::InvalidFileType {
        path: path.display().to_string(),
    })?;

    let records = match format {
        FileFormat::Csv => parse_csv(path)?,
        FileFormat::Json => parse_json(path)?,
    };
    for (record, attributes) in records.iter().enumerate() {
        validate_record(path, record, attributes)?;
    }
    Ok(records)
}

/// Load a file into the catalog, returning how many records were processed.
///
/// Records upsert by title, so re-ingesting a file updates movies in place
/// instead of duplicating them.
pub fn ingest_file(catalog: &mut Catalog, path: &Path) -> Result<usize> {
    let records = load_records(path)?;
    let mut processed = 0;
    for attributes in records {
        catalog.upsert(attributes);
        processed += 1;
    }
    info!("Processed {} records from {}", processed, path.display());
    Ok(processed)
}

impl Catalog {
    /// Build a catalog from a single CSV or JSON file
    pub fn load_path(path: &Path) -> Result<Self> {
        let mut catalog = Catalog::new();
        ingest_file(&mut catalog, path)?;
        Ok(catalog)
    }
}
