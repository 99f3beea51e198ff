//! End-to-end ingestion tests against real files on disk.

use catalog::{AttrValue, Catalog, CatalogError, ingest_file};
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

const MOVIES_CSV: &str = "\
title,genres,director,release_year
The Terminator,Action|Sci-Fi,James Cameron,1984
Aliens,Action|Sci-Fi|Horror,James Cameron,1986
The Notebook,Romance|Drama,Nick Cassavetes,2004
";

const MOVIES_JSON: &str = r#"[
    {"title": "Blade Runner", "genres": ["Sci-Fi", "Noir"], "release_year": 1982},
    {"title": "Commando", "genres": ["Action"], "director": "Mark L. Lester"}
]"#;

#[test]
fn test_csv_file_loads_into_catalog() {
    let file = temp_file(".csv", MOVIES_CSV);
    let catalog = Catalog::load_path(file.path()).unwrap();

    assert_eq!(catalog.len(), 3);

    // Rows keep file order and get sequential ids
    let titles: Vec<&str> = catalog.iter().map(|movie| movie.title()).collect();
    assert_eq!(titles, vec!["The Terminator", "Aliens", "The Notebook"]);

    let terminator = catalog.get(1).unwrap();
    assert_eq!(
        terminator.attributes.get("genres"),
        Some(&AttrValue::List(vec![
            "Action".to_string(),
            "Sci-Fi".to_string()
        ]))
    );
    assert_eq!(
        terminator.attributes.get("release_year"),
        Some(&AttrValue::Int(1984))
    );
    assert_eq!(
        terminator.attributes.get("director"),
        Some(&AttrValue::Text("James Cameron".to_string()))
    );
}

#[test]
fn test_csv_empty_cells_are_skipped() {
    let file = temp_file(
        ".csv",
        "title,genres,director\nThe Terminator,Action,\nAliens,,James Cameron\n",
    );
    let catalog = Catalog::load_path(file.path()).unwrap();

    let terminator = catalog.get(1).unwrap();
    assert!(terminator.attributes.get("director").is_none());

    let aliens = catalog.get(2).unwrap();
    assert!(aliens.attributes.get("genres").is_none());
    assert_eq!(
        aliens.attributes.get("director"),
        Some(&AttrValue::Text("James Cameron".to_string()))
    );
}

#[test]
fn test_json_file_loads_with_key_order() {
    let file = temp_file(".json", MOVIES_JSON);
    let catalog = Catalog::load_path(file.path()).unwrap();

    assert_eq!(catalog.len(), 2);

    let blade_runner = catalog.get(1).unwrap();
    let names: Vec<&str> = blade_runner.attributes.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["title", "genres", "release_year"]);
}

#[test]
fn test_reingest_updates_instead_of_duplicating() {
    let mut catalog = Catalog::new();

    let first = temp_file(".json", MOVIES_JSON);
    let processed = ingest_file(&mut catalog, first.path()).unwrap();
    assert_eq!(processed, 2);

    // Same titles again, one with changed attributes
    let second = temp_file(
        ".json",
        r#"[
            {"title": "Blade Runner", "genres": ["Sci-Fi"], "release_year": 1982, "director": "Ridley Scott"},
            {"title": "Commando", "genres": ["Action"], "director": "Mark L. Lester"}
        ]"#,
    );
    let processed = ingest_file(&mut catalog, second.path()).unwrap();
    assert_eq!(processed, 2);

    assert_eq!(catalog.len(), 2);
    let blade_runner = catalog.get(1).unwrap();
    assert_eq!(
        blade_runner.attributes.get("director"),
        Some(&AttrValue::Text("Ridley Scott".to_string()))
    );
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let file = temp_file(".txt", "not a catalog");
    let err = Catalog::load_path(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidFileType { .. }));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let file = temp_file(".json", "{\"title\": \"not an array\"}");
    let err = Catalog::load_path(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::JsonError { .. }));
}

#[test]
fn test_out_of_range_release_year_fails_validation() {
    let file = temp_file(
        ".json",
        r#"[{"title": "Roundhay Garden Scene", "release_year": 1887}]"#,
    );
    let err = Catalog::load_path(file.path()).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidReleaseYear { year: 1887, .. }
    ));
}

#[test]
fn test_record_without_title_fails_validation() {
    let file = temp_file(".json", r#"[{"genres": ["Action"]}]"#);
    let err = Catalog::load_path(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { field, .. } if field == "title"));
}
