use std::collections::{BTreeSet, HashSet};

/// Cosine similarity between two hobby sets (0.0 to 1.0)
///
/// Each set is projected onto a binary indicator vector over the union of
/// both sets, and the score is the cosine of the angle between the two
/// vectors. The vocabulary comes from the two inputs only, so a given pair
/// of hobby sets always produces the same score.
///
/// An empty set has a zero-length vector; the score is then 0.0.
pub fn cosine_similarity(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let vocabulary: BTreeSet<&str> = a.union(b).copied().collect();

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for hobby in vocabulary {
        let x = indicator(a.contains(hobby));
        let y = indicator(b.contains(hobby));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    // sqrt(|a|^2 * |b|^2) keeps score(A, A) at exactly 1.0
    let denominator = (norm_a * norm_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (dot / denominator).clamp(0.0, 1.0)
}

/// Score two raw hobby lists, deduplicating them first
pub fn hobby_similarity<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let a: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let b: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    cosine_similarity(&a, &b)
}

#[inline]
fn indicator(present: bool) -> f64 {
    if present { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<'a>(items: &[&'a str]) -> HashSet<&'a str> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_identical_sets() {
        let a = set(&["Gaming", "Travel", "Music"]);
        assert_eq!(cosine_similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_disjoint_sets() {
        assert_eq!(cosine_similarity(&set(&["Art"]), &set(&["Gaming"])), 0.0);
    }

    #[test]
    fn test_empty_sets() {
        assert_eq!(cosine_similarity(&set(&["Art"]), &set(&[])), 0.0);
        assert_eq!(cosine_similarity(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let score = cosine_similarity(&set(&["a", "b"]), &set(&["a", "b", "c"]));
        let expected = 2.0 / (2.0_f64.sqrt() * 3.0_f64.sqrt());
        assert!((score - expected).abs() < 1e-12, "got {}", score);
    }

    #[test]
    fn test_duplicates_ignored() {
        let score = hobby_similarity(&["Art", "Art", "Music"], &["Art", "Music"]);
        assert_eq!(score, 1.0);
    }
}
