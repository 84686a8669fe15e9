//! String similarity scores on a 0–100 scale.
//!
//! This module provides the fuzzy matching primitives used by the typo
//! corrector. Scores are based on the indel distance (insertions and
//! deletions only), which is `|a| + |b| - 2 * LCS(a, b)`.
//!
//! - [`ratio`] compares two whole strings.
//! - [`partial_ratio`] aligns the shorter string against the best matching
//!   window of the longer one, so "makan" scores 100 against
//!   "tidak mau makan".

/// Length of the longest common subsequence of two char slices.
#[allow(clippy::needless_range_loop)]
pub fn lcs_length(s1: &[char], s2: &[char]) -> usize {
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }

    // Use only two rows for space optimization
    let mut prev_row = vec![0usize; s2.len() + 1];
    let mut curr_row = vec![0usize; s2.len() + 1];

    for i in 1..=s1.len() {
        for j in 1..=s2.len() {
            curr_row[j] = if s1[i - 1] == s2[j - 1] {
                prev_row[j - 1] + 1
            } else {
                prev_row[j].max(curr_row[j - 1])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[s2.len()]
}

/// Indel distance between two strings.
pub fn indel_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    a.len() + b.len() - 2 * lcs_length(&a, &b)
}

fn ratio_chars(s1: &[char], s2: &[char]) -> f64 {
    let total = s1.len() + s2.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (2 * lcs_length(s1, s2)) as f64 / total as f64
}

/// Normalized indel similarity between two strings (0–100).
///
/// Two empty strings are identical and score 100.
pub fn ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of `shorter` against every alignment window of `longer`.
///
/// Windows are the full-length windows of `longer` plus the shorter prefix
/// and suffix windows at either end, so a needle that only partly overlaps
/// the start or the end of the haystack is still scored.
fn partial_ratio_windows(shorter: &[char], longer: &[char]) -> f64 {
    let len1 = shorter.len();
    let len2 = longer.len();
    let mut best = 0.0f64;

    // Prefix windows shorter than the needle.
    for end in 1..len1 {
        best = best.max(ratio_chars(shorter, &longer[..end]));
    }

    // Full-length windows, including the one flush with the end.
    for start in 0..=(len2 - len1) {
        best = best.max(ratio_chars(shorter, &longer[start..start + len1]));
        if best >= 100.0 {
            return 100.0;
        }
    }

    // Suffix windows shorter than the needle.
    for start in (len2 - len1 + 1)..len2 {
        best = best.max(ratio_chars(shorter, &longer[start..]));
    }

    best
}

/// Partial-string similarity between two strings (0–100).
///
/// The shorter string is aligned against the longer one. When both strings
/// have the same length the alignment is tried in both directions and the
/// better score wins. An empty string scores 0 against a non-empty one.
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let score = partial_ratio_windows(shorter, longer);

    if score < 100.0 && a.len() == b.len() {
        return score.max(partial_ratio_windows(longer, shorter));
    }

    score
}

/// A scored candidate returned by [`extract_one`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch<'a> {
    /// The matched candidate.
    pub choice: &'a str,
    /// Similarity score (0–100).
    pub score: f64,
    /// Position of the candidate in the choice list.
    pub index: usize,
}

/// Find the choice with the highest [`partial_ratio`] against `query`.
///
/// Ties keep the earliest choice. Returns `None` only when `choices` is empty.
pub fn extract_one<'a, I>(query: &str, choices: I) -> Option<ScoredMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<ScoredMatch<'a>> = None;

    for (index, choice) in choices.into_iter().enumerate() {
        let score = partial_ratio(query, choice);
        let better = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if better {
            best = Some(ScoredMatch {
                choice,
                score,
                index,
            });
            if score >= 100.0 {
                break;
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_lcs_and_indel() {
        let a: Vec<char> = "sakit".chars().collect();
        let b: Vec<char> = "sakt".chars().collect();
        assert_eq!(lcs_length(&a, &b), 4);
        assert_eq!(indel_distance("sakit", "sakt"), 1);
        assert_eq!(indel_distance("", "abc"), 3);
        assert_eq!(indel_distance("abc", "abc"), 0);
    }

    #[test]
    fn test_ratio() {
        assert!(approx(ratio("", ""), 100.0));
        assert!(approx(ratio("abc", "abc"), 100.0));
        assert!(approx(ratio("abc", "def"), 0.0));
        assert!(approx(ratio("sapi", "sapu"), 75.0));
    }

    #[test]
    fn test_partial_ratio_substring() {
        assert!(approx(partial_ratio("makan", "tidak mau makan"), 100.0));
        assert!(approx(partial_ratio("tidak mau makan", "makan"), 100.0));
        assert!(approx(partial_ratio("sapi", "sapi"), 100.0));
    }

    #[test]
    fn test_partial_ratio_edge_windows() {
        // "sak" is a prefix window of "sakit": 2 * 3 / 7
        assert!(approx(partial_ratio("sakt", "sakit"), 600.0 / 7.0));
        // Equal lengths are tried in both directions; "aya" prefixes "ayam".
        assert!(approx(partial_ratio("saya", "ayam"), 600.0 / 7.0));
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert!(approx(partial_ratio("", ""), 100.0));
        assert!(approx(partial_ratio("", "sapi"), 0.0));
        assert!(approx(partial_ratio("sapi", ""), 0.0));
    }

    #[test]
    fn test_extract_one() {
        let choices = ["mati", "sakit", "sapi"];
        let best = extract_one("sakt", choices.iter().copied()).unwrap();
        assert_eq!(best.choice, "sakit");
        assert_eq!(best.index, 1);

        assert!(extract_one("sakt", std::iter::empty()).is_none());
    }

    #[test]
    fn test_extract_one_tie_keeps_first() {
        let choices = ["ternak", "hewan ternak"];
        let best = extract_one("ternak", choices.iter().copied()).unwrap();
        assert_eq!(best.choice, "ternak");
        assert!(approx(best.score, 100.0));
    }
}
