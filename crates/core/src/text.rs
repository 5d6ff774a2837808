//! Text matching and ordering helpers shared by every wizard step.
//!
//! Each step listing filters by the same case-insensitive substring rule and
//! sorts by the same case-insensitive name order; both live here so no step
//! grows its own variant.

use core::cmp::Ordering;

/// Case-insensitive substring check used by every step filter.
///
/// The needle is trimmed first; an empty (or whitespace-only) needle matches
/// everything, which is what a cleared search box means.
pub fn normalized_contains(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive name ordering for step listings.
///
/// Unicode-aware lowercasing stands in for full locale collation; ties fall
/// back to the raw strings so the order stays total and deterministic.
pub fn cmp_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
