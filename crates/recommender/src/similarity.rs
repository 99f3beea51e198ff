//! Vector similarity scoring.

/// Cosine similarity between two equal-length count vectors.
///
/// Returns the dot product over the product of magnitudes, in `[0, 1]` for
/// count vectors. A zero vector is orthogonal to everything and scores 0.0,
/// so empty documents and empty vocabularies rank last instead of failing.
///
/// Both vectors come from the same fitted vectorizer, which is what
/// guarantees equal lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
