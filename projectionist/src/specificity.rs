//! Specificity ordering of patterns and registry roots.
//!
//! Sorting ascending with [`compare`] puts the most specific entry first:
//!
//! 1. fewer `*` characters after normalization
//! 2. then more `/` separators
//! 3. then reverse lexicographic order, for determinism only
//!
//! Registry roots are ordered the same way, as patterns without wildcards.

use crate::pattern::normalize;
use std::cmp::Ordering;

/// Compare two patterns. `Less` means `a` is more specific than `b`.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (a, b) = (normalize(a), normalize(b));
    wildcards(&a)
        .cmp(&wildcards(&b))
        .then_with(|| separators(&b).cmp(&separators(&a)))
        .then_with(|| b.cmp(&a))
}

/// Sort in place, most specific first.
pub fn sort_by_specificity<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| compare(a.as_ref(), b.as_ref()));
}

fn wildcards(pattern: &str) -> usize {
    pattern.matches('*').count()
}

fn separators(pattern: &str) -> usize {
    pattern.matches('/').count()
}
