//! Placeholder comparison metrics.
//!
//! These are deliberately coarse stand-ins for real NLP metrics, kept for
//! pipeline demonstration and reproducibility:
//!
//! | Metric | What it actually is |
//! |--------|---------------------|
//! | `rouge_like` | word-set overlap over the original's word-set size |
//! | `length_ratio` | character length ratio, adversarial / original |
//! | `mauve_like` | a uniform random value in [0.25, 0.75] |
//!
//! None of them is a statistically valid similarity measure. `mauve_like`
//! in particular carries no signal at all; it exists so the result schema
//! matches what a real distributional metric would produce. Do not read
//! meaning into these numbers.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scores comparing an original response with an adversarial one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Word-overlap ratio in [0, 1]: shared lowercased words over the
    /// original response's distinct word count (denominator floored at 1).
    pub rouge_like: f64,
    /// Character-length ratio, adversarial over original (denominator
    /// floored at 1). Non-negative, unbounded above.
    pub length_ratio: f64,
    /// Placeholder value uniform in [0.25, 0.75]. Non-semantic.
    pub mauve_like: f64,
}

/// Score `adversarial` against `original`.
///
/// Consumes exactly one uniform draw from `rng` (for `mauve_like`). There
/// are no error conditions; empty strings are handled by the floored
/// denominators.
pub fn evaluate<R: Rng>(original: &str, adversarial: &str, rng: &mut R) -> MetricSet {
    let original_lower = original.to_lowercase();
    let adversarial_lower = adversarial.to_lowercase();
    let original_words: HashSet<&str> = original_lower.split_whitespace().collect();
    let adversarial_words: HashSet<&str> = adversarial_lower.split_whitespace().collect();

    let overlap = original_words.intersection(&adversarial_words).count();
    let rouge_like = overlap as f64 / original_words.len().max(1) as f64;

    let length_ratio =
        adversarial.chars().count() as f64 / original.chars().count().max(1) as f64;

    let mauve_like = 0.5 + (rng.gen::<f64>() * 0.5 - 0.25);

    MetricSet {
        rouge_like,
        length_ratio,
        mauve_like,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn identical_responses_give_full_overlap_and_unit_length() {
        let mut rng = StdRng::seed_from_u64(0);
        let metrics = evaluate("The model replied here", "The model replied here", &mut rng);
        assert_eq!(metrics.rouge_like, 1.0);
        assert_eq!(metrics.length_ratio, 1.0);
    }

    #[test]
    fn empty_adversarial_gives_zero_length_ratio() {
        let mut rng = StdRng::seed_from_u64(0);
        let metrics = evaluate("non-empty response", "", &mut rng);
        assert_eq!(metrics.length_ratio, 0.0);
        assert_eq!(metrics.rouge_like, 0.0);
    }

    #[test]
    fn empty_original_does_not_divide_by_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        let metrics = evaluate("", "something", &mut rng);
        assert_eq!(metrics.rouge_like, 0.0);
        assert_eq!(metrics.length_ratio, 9.0);
    }

    #[test]
    fn overlap_is_case_insensitive() {
        let mut rng = StdRng::seed_from_u64(0);
        let metrics = evaluate("Hello World", "hello world", &mut rng);
        assert_eq!(metrics.rouge_like, 1.0);
    }

    #[test]
    fn partial_overlap_is_fractional() {
        let mut rng = StdRng::seed_from_u64(0);
        // 2 of 4 distinct original words shared.
        let metrics = evaluate("a b c d", "a b x y", &mut rng);
        assert_eq!(metrics.rouge_like, 0.5);
    }

    #[test]
    fn mauve_like_stays_in_documented_band() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let metrics = evaluate("a", "b", &mut rng);
            assert!(
                (0.25..=0.75).contains(&metrics.mauve_like),
                "mauve_like out of band for seed {}: {}",
                seed,
                metrics.mauve_like
            );
        }
    }

    #[test]
    fn length_ratio_counts_chars_not_bytes() {
        let mut rng = StdRng::seed_from_u64(0);
        // Both sides 2 chars, byte lengths differ.
        let metrics = evaluate("éé", "ab", &mut rng);
        assert_eq!(metrics.length_ratio, 1.0);
    }
}
