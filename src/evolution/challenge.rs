//! # Challenge
//!
//! A `Challenge` scores a candidate string. Scores are costs: lower is better,
//! zero means the candidate is a perfect answer. Implementations must be pure,
//! since the ranking stage calls them from several threads at once.

/// Scores candidate strings.
pub trait Challenge: Send + Sync {
    /// Returns the non-negative, finite cost of `candidate`.
    fn score(&self, candidate: &[u8]) -> f64;

    /// Length of the string this challenge is looking for, if it knows it.
    ///
    /// Used to derive the default maximum individual size.
    fn target_len(&self) -> Option<usize> {
        None
    }
}

impl<F> Challenge for F
where
    F: Fn(&[u8]) -> f64 + Send + Sync,
{
    fn score(&self, candidate: &[u8]) -> f64 {
        self(candidate)
    }
}

/// Cost of one unit of code-point distance at a shared position.
const SYMBOL_WEIGHT: f64 = 256.0;
/// Cost of one missing or surplus byte.
const LENGTH_WEIGHT: f64 = 256.0 * 256.0;

/// Measures how far a guess is from a fixed target string.
///
/// Every position covered by both strings costs the absolute difference of
/// the two bytes times 256. Every byte of length mismatch costs 256², so
/// getting the length right dominates the early search.
///
/// ```rust
/// use strevolve::evolution::{Challenge, TargetChallenge};
///
/// let challenge = TargetChallenge::new("AB");
/// assert_eq!(challenge.score(b"AB"), 0.0);
/// assert_eq!(challenge.score(b"AC"), 256.0);
/// assert_eq!(challenge.score(b"A"), 65536.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetChallenge {
    target: Vec<u8>,
}

impl TargetChallenge {
    pub fn new(target: impl Into<Vec<u8>>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }
}

impl Challenge for TargetChallenge {
    fn score(&self, candidate: &[u8]) -> f64 {
        let symbol_cost: f64 = self
            .target
            .iter()
            .zip(candidate)
            .map(|(&t, &c)| f64::from((i16::from(t) - i16::from(c)).unsigned_abs()) * SYMBOL_WEIGHT)
            .sum();
        let length_cost = self.target.len().abs_diff(candidate.len()) as f64 * LENGTH_WEIGHT;
        let total = symbol_cost + length_cost;
        debug_assert!(total >= 0.0);
        total
    }

    fn target_len(&self) -> Option<usize> {
        Some(self.target.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_scores_zero() {
        let challenge = TargetChallenge::new("struct GAParams {}");
        assert_eq!(challenge.score(b"struct GAParams {}"), 0.0);
    }

    #[test]
    fn test_symbol_distance_is_absolute() {
        let challenge = TargetChallenge::new("M");
        assert_eq!(challenge.score(b"A"), 12.0 * 256.0);
        assert_eq!(challenge.score(b"Y"), 12.0 * 256.0);
    }

    #[test]
    fn test_length_penalty_both_directions() {
        let challenge = TargetChallenge::new("abc");
        assert_eq!(challenge.score(b"abcde"), 2.0 * 65536.0);
        assert_eq!(challenge.score(b"a"), 2.0 * 65536.0);
        assert_eq!(challenge.score(b""), 3.0 * 65536.0);
    }

    #[test]
    fn test_mixed_cost() {
        let challenge = TargetChallenge::new("AB");
        // 'C' - 'B' = 1 at position 1, one byte too long.
        assert_eq!(challenge.score(b"ACz"), 256.0 + 65536.0);
    }

    #[test]
    fn test_high_bytes_do_not_wrap() {
        let challenge = TargetChallenge::new(vec![0u8]);
        assert_eq!(challenge.score(&[255]), 255.0 * 256.0);
    }

    #[test]
    fn test_closure_challenge() {
        let challenge = |candidate: &[u8]| candidate.len() as f64;
        assert_eq!(challenge.score(b"four"), 4.0);
        assert_eq!(Challenge::target_len(&challenge), None);
    }

    #[test]
    fn test_target_len() {
        assert_eq!(TargetChallenge::new("hello").target_len(), Some(5));
    }
}
