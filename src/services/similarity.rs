//! Token-sort similarity scorer.
//!
//! [`token_sort_ratio`] scores two titles on a 0–100 scale, invariant
//! under token reordering: both strings are lowercased, stripped of
//! punctuation, split into tokens, sorted, rejoined, and compared with an
//! insert/delete edit-distance ratio. "Apple drops prices" and "Prices
//! dropped, Apple" score as near-identical.
//!
//! The ratio is `100 * (total - d) / total` where `d` is the
//! indel distance (Levenshtein without substitution) and `total` the
//! summed character lengths of the normalized strings. Two empty strings
//! score 100.

/// Scores the similarity of two titles, ignoring token order.
///
/// Pure and total: any two strings, including empty ones, yield a score
/// in `[0, 100]`. Symmetric, and `token_sort_ratio(x, x) == 100`.
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> u32 {
    indel_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Lowercases, replaces non-alphanumerics with spaces, then sorts the
/// resulting tokens and rejoins them with single spaces.
fn sorted_tokens(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Rounded `100 * (total - d) / total` similarity from the indel distance.
fn indel_ratio(a: &str, b: &str) -> u32 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100;
    }
    let distance = indel_distance(a, b);
    // Integer round-half-up; total is tiny so no overflow concerns.
    u32::try_from((100 * (total - distance) + total / 2) / total).unwrap_or(100)
}

/// Edit distance with insertions and deletions only (no substitution),
/// computed over chars with a two-row dynamic program.
fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j + 1].min(current[j])
            };
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(token_sort_ratio("Storm hits coast", "Storm hits coast"), 100);
    }

    #[test]
    fn empty_strings_score_100() {
        assert_eq!(token_sort_ratio("", ""), 100);
    }

    #[test]
    fn empty_vs_nonempty_scores_0() {
        assert_eq!(token_sort_ratio("", "Storm hits coast"), 0);
    }

    #[test]
    fn reordered_tokens_score_100() {
        assert_eq!(
            token_sort_ratio("Apple drops prices", "prices drops Apple"),
            100
        );
    }

    #[test]
    fn reworded_title_scores_high() {
        // One inserted word in a three-word title stays well above a
        // typical threshold of 80.
        let score = token_sort_ratio("Storm hits coast", "Storm hits the coast");
        assert!(score > 80, "score was {score}");
    }

    #[test]
    fn punctuation_and_case_ignored() {
        assert_eq!(
            token_sort_ratio("Apple drops prices!", "PRICES, apple drops"),
            100
        );
    }

    #[test]
    fn unrelated_titles_score_low() {
        let score = token_sort_ratio("Storm hits coast", "Quarterly earnings beat estimates");
        assert!(score < 50, "score was {score}");
    }

    #[test_case("Storm hits coast", "Storm hits the coast")]
    #[test_case("", "anything")]
    #[test_case("a", "b")]
    #[test_case("Apple drops prices", "Prices dropped, Apple")]
    fn symmetric(a: &str, b: &str) {
        assert_eq!(token_sort_ratio(a, b), token_sort_ratio(b, a));
    }

    #[test]
    fn indel_counts_inserts_and_deletes() {
        assert_eq!(indel_distance("abc", "abc"), 0);
        assert_eq!(indel_distance("abc", "abxc"), 1);
        // No substitution: replacing a char costs a delete plus an insert.
        assert_eq!(indel_distance("abc", "abd"), 2);
        assert_eq!(indel_distance("", "abcd"), 4);
    }
}
