//! Attribute flattening into vectorizer documents.
//!
//! Movies and user profiles both arrive as attribute maps. Before anything
//! can be scored, each map is flattened into a single lowercase document so
//! one vectorizer can treat both sides of the comparison identically.

use catalog::Attributes;

/// Flatten an attribute map into one lowercase, space-joined document.
///
/// Values contribute in map order: list values join their elements with
/// single spaces, scalars contribute the lowercase of their string form.
/// Attribute names never appear in the document, only values do. An empty
/// map yields the empty string, which vectorizes to the zero vector and
/// scores 0 against everything.
///
/// # Arguments
/// * `attributes` - The map to flatten
///
/// # Returns
/// The combined document, trimmed of leading and trailing whitespace
pub fn combine_attributes(attributes: &Attributes) -> String {
    let mut document = String::new();
    for value in attributes.values() {
        if !document.is_empty() {
            document.push(' ');
        }
        value.push_lowercase(&mut document);
    }
    document.trim().to_string()
}
