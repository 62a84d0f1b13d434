//! Edit-distance similarity between header spellings.

use rapidfuzz::distance::levenshtein;

/// Trims and lowercases text before comparison.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Similarity in `[0, 1]` derived from Levenshtein distance.
///
/// Both inputs are normalized first; identical normalized strings score
/// exactly `1.0`. Lengths count Unicode scalar values, so Arabic headers are
/// compared character by character rather than byte by byte.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_header(a);
    let b = normalize_header(b);
    if a == b {
        return 1.0;
    }
    let longest = a.chars().count().max(b.chars().count());
    let distance = levenshtein::distance(a.chars(), b.chars());
    (1.0 - distance as f64 / longest as f64).max(0.0)
}
