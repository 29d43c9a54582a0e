//! Loose string comparison for producer-supplied labels.
//!
//! Everything is compared trimmed and lowercased. An empty side never
//! matches anything.

/// Trim and lowercase.
#[inline]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// `a == b` after normalization; empty never matches.
pub fn equals_loose(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    !a.is_empty() && a == b
}

/// Equality or containment in either direction, on already-normalized input.
pub(crate) fn overlaps(field: &str, query: &str) -> bool {
    !field.is_empty() && !query.is_empty() && (field == query || field.contains(query) || query.contains(field))
}

/// Equality or containment in either direction after normalization.
pub fn overlaps_loose(a: &str, b: &str) -> bool {
    overlaps(&normalize(a), &normalize(b))
}
