//! Bounded string similarity in `[0, 1]`.
//!
//! Exact match scores 1, containment scores a fixed bonus, anything else
//! falls back to normalized Levenshtein distance.

use super::config::DEFAULT_CONTAINMENT_SCORE;
use super::normalize::normalize;

/// Compute edit distance between two strings (Levenshtein), counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Similarity of two raw strings with the default containment score.
///
/// Symmetric, and `similarity(a, a) == 1.0` for every `a`.
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_with_containment(a, b, DEFAULT_CONTAINMENT_SCORE)
}

/// Similarity of two raw strings, scoring containment as `containment_score`.
pub fn similarity_with_containment(a: &str, b: &str, containment_score: f64) -> f64 {
    normalized_similarity(&normalize(a), &normalize(b), containment_score)
}

/// Same as [`similarity_with_containment`] for inputs that are already normalized.
pub(crate) fn normalized_similarity(a: &str, b: &str, containment_score: f64) -> f64 {
    if a == b {
        return 1.0;
    }
    if !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a)) {
        return containment_score;
    }

    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let dist = edit_distance(a, b);
    (1.0 - dist as f64 / longest as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("kerala", "keral"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", "abc"), 0);
    }

    #[test]
    fn test_edit_distance_counts_chars_not_bytes() {
        assert_eq!(edit_distance("tromsø", "tromso"), 1);
    }

    #[test]
    fn test_similarity_identical() {
        assert_relative_eq!(similarity("Kerala", "kerala"), 1.0);
        assert_relative_eq!(similarity("", ""), 1.0);
        assert_relative_eq!(similarity("  ", "."), 1.0);
    }

    #[test]
    fn test_similarity_containment_bonus() {
        assert_relative_eq!(similarity("North Bihar Division", "Bihar"), 0.8);
        assert_relative_eq!(similarity("bihar", "north bihar"), 0.8);
        assert_relative_eq!(similarity_with_containment("bihar", "north bihar", 0.65), 0.65);
    }

    #[test]
    fn test_similarity_empty_side_is_not_containment() {
        assert_relative_eq!(similarity("", "goa"), 0.0);
    }

    #[test]
    fn test_similarity_edit_distance() {
        // one substitution across nine chars
        assert_relative_eq!(similarity("Telengana", "Telangana"), 1.0 - 1.0 / 9.0);
        assert_relative_eq!(similarity("abcdwxyz", "abcdefgh"), 0.5);
    }

    #[test]
    fn test_similarity_bounded() {
        let s = similarity("xyz", "abcdefghij");
        assert!((0.0..=1.0).contains(&s));
        assert_relative_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_symmetric() {
        let pairs = [
            ("Keralaa", "kerala"),
            ("Orissa", "Odisha"),
            ("Jammu & Kashmir", "jammu and kashmir"),
            ("", "punjab"),
            ("Pondicherry", "Puducherry"),
        ];
        for (a, b) in pairs {
            assert_relative_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn test_similarity_reflexive() {
        for s in ["Tamil Nadu", "", "N.C.T.", "ernakulam"] {
            assert_relative_eq!(similarity(s, s), 1.0);
        }
    }
}
