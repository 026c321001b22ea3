//! Similarity kernels: numeric distance on the 1–5 dimension scale and
//! Jaccard overlap on string sets. Both return values in [0, 1].

use std::collections::BTreeSet;

use crate::catalog::models::{DIMENSION_MAX, DIMENSION_MIN};

/// Largest possible per-dimension difference on the 1–5 scale.
pub const MAX_DIFF: f64 = (DIMENSION_MAX - DIMENSION_MIN) as f64;

/// Absolute difference between two ratings. Symmetric.
pub fn dimension_diff(a: i32, b: i32) -> f64 {
    (a - b).abs() as f64
}

/// Per-dimension closeness: 1 for equal ratings, 0 at opposite ends of the scale.
pub fn dimension_closeness(a: i32, b: i32) -> f64 {
    (1.0 - dimension_diff(a, b) / MAX_DIFF).clamp(0.0, 1.0)
}

/// `1 - rms(diff) / MAX_DIFF`, clamped to [0, 1]. Returns 1 for no pairs.
pub fn numeric_similarity(pairs: &[(i32, i32)]) -> f64 {
    if pairs.is_empty() {
        return 1.0;
    }
    let sum_sq: f64 = pairs
        .iter()
        .map(|&(a, b)| dimension_diff(a, b).powi(2))
        .sum();
    let rms = (sum_sq / pairs.len() as f64).sqrt();
    (1.0 - rms / MAX_DIFF).clamp(0.0, 1.0)
}

/// Trimmed, lowercased set used for overlap comparisons.
pub fn normalized_set<'a, I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Overlap between two normalized sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub jaccard: f64,
    /// Shared items, sorted.
    pub shared: Vec<String>,
}

/// `|A ∩ B| / |A ∪ B|`; two empty sets count as a full match.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Overlap {
    let shared: Vec<String> = a.intersection(b).cloned().collect();
    let union = a.union(b).count();

    let jaccard = if union == 0 {
        1.0
    } else {
        shared.len() as f64 / union as f64
    };

    Overlap { jaccard, shared }
}
