//! Majority-vote tally over normalized candidate answers
//!
//! The tally is built fresh for every call — it is never shared or reused
//! across problems, so concurrent batch aggregations cannot leak counts
//! into each other.

use super::candidate::Candidate;
use crate::answer::key::AnswerKey;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Result of a self-consistency vote over one problem's candidates
///
/// # Example
///
/// ```
/// use tally_domain::{Candidate, VoteOutcome};
///
/// let candidates: Vec<_> = ["7", "9", "7"]
///     .iter()
///     .enumerate()
///     .map(|(i, raw)| Candidate::new(i, *raw))
///     .collect();
///
/// let outcome = VoteOutcome::tally(&candidates).unwrap();
/// assert_eq!(outcome.key.as_str(), "7");
/// assert_eq!(outcome.count, 2);
/// assert!((outcome.agreement() - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOutcome {
    /// Raw text of the first candidate whose key equals the winner
    pub raw: String,
    /// The winning normalized key
    pub key: AnswerKey,
    /// Number of candidates that voted for the winner
    pub count: usize,
    /// Total number of candidates
    pub total: usize,
    /// Per-key counts in first-seen order, for diagnostics
    pub counts: Vec<(AnswerKey, usize)>,
}

impl VoteOutcome {
    /// Reduce candidates to a single decision by majority vote.
    ///
    /// Winner selection: the key with the strictly highest count. Ties break
    /// toward the key that first appeared earliest in the input sequence, so
    /// repeated calls on the same ordered input are reproducible. An input
    /// of N unique keys is not an error — the first-seen key wins with
    /// count 1.
    ///
    /// Returns [`DomainError::NoCandidates`] for an empty input; the tally
    /// never fabricates a winner.
    pub fn tally(candidates: &[Candidate]) -> Result<Self, DomainError> {
        if candidates.is_empty() {
            return Err(DomainError::NoCandidates);
        }

        // Counts in first-seen order; the Vec doubles as the tie-break order.
        let mut counts: Vec<(AnswerKey, usize)> = Vec::new();
        for candidate in candidates {
            match counts.iter_mut().find(|(key, _)| *key == candidate.key) {
                Some((_, n)) => *n += 1,
                None => counts.push((candidate.key.clone(), 1)),
            }
        }

        // Strictly-highest count wins; on a tie the earlier first appearance
        // keeps the slot (max_by_key would keep the last maximum, not the
        // first, so scan explicitly).
        let mut winner = 0;
        for (i, (_, n)) in counts.iter().enumerate().skip(1) {
            if *n > counts[winner].1 {
                winner = i;
            }
        }
        let (key, count) = counts[winner].clone();

        let raw = candidates
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.raw.clone())
            .unwrap_or_default();

        Ok(Self {
            raw,
            key,
            count,
            total: candidates.len(),
            counts,
        })
    }

    /// Fraction of candidates whose key matches the winner (0.0 to 1.0)
    pub fn agreement(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count as f64 / self.total as f64
        }
    }

    /// Whether every candidate agreed on the winning key
    pub fn is_unanimous(&self) -> bool {
        self.count == self.total
    }

    /// Visual vote summary (e.g. "[##_#]": winner votes as '#')
    pub fn vote_summary(&self, candidates: &[Candidate]) -> String {
        let mut summary = String::from("[");
        for candidate in candidates {
            summary.push(if candidate.key == self.key { '#' } else { '_' });
        }
        summary.push(']');
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(raws: &[&str]) -> Vec<Candidate> {
        raws.iter()
            .enumerate()
            .map(|(i, raw)| Candidate::new(i, *raw))
            .collect()
    }

    #[test]
    fn test_simple_majority() {
        let outcome = VoteOutcome::tally(&candidates(&["7", "9", "7"])).unwrap();
        assert_eq!(outcome.key, AnswerKey::Numeric("7".to_string()));
        assert_eq!(outcome.count, 2);
        assert_eq!(outcome.total, 3);
        assert!((outcome.agreement() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_tie_breaks_to_first_seen() {
        let outcome = VoteOutcome::tally(&candidates(&["a", "b"])).unwrap();
        assert_eq!(outcome.key, AnswerKey::Text("a".to_string()));
        assert_eq!(outcome.count, 1);
        assert!((outcome.agreement() - 0.5).abs() < 1e-12);

        // Later repeats must not steal a tie from an earlier first-seen key
        let outcome = VoteOutcome::tally(&candidates(&["a", "b", "b", "a"])).unwrap();
        assert_eq!(outcome.key, AnswerKey::Text("a".to_string()));
    }

    #[test]
    fn test_all_unique_still_produces_winner() {
        let outcome = VoteOutcome::tally(&candidates(&["1", "2", "3", "4"])).unwrap();
        assert_eq!(outcome.key, AnswerKey::Numeric("1".to_string()));
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn test_empty_input_is_explicit_error() {
        let err = VoteOutcome::tally(&[]).unwrap_err();
        assert!(err.is_no_candidates());
    }

    #[test]
    fn test_determinism_across_calls() {
        let cs = candidates(&["3", "4", "3", "5", "4"]);
        let a = VoteOutcome::tally(&cs).unwrap();
        let b = VoteOutcome::tally(&cs).unwrap();
        assert_eq!(a.key, b.key);
        assert_eq!(a.count, b.count);
        assert_eq!(a.agreement(), b.agreement());
    }

    #[test]
    fn test_normalization_merges_equivalent_raw_forms() {
        let cs = candidates(&["x = 3", "x=3", "The answer is 3", "x = 4", "3"]);
        let outcome = VoteOutcome::tally(&cs).unwrap();
        assert_eq!(outcome.key, AnswerKey::Numeric("3".to_string()));
        assert_eq!(outcome.count, 4);
        assert_eq!(outcome.total, 5);
        assert!((outcome.agreement() - 0.8).abs() < 1e-12);
        // Winning representative is the first raw text with the winning key
        assert_eq!(outcome.raw, "x = 3");
    }

    #[test]
    fn test_counts_preserve_first_seen_order() {
        let cs = candidates(&["b", "a", "b", "c"]);
        let outcome = VoteOutcome::tally(&cs).unwrap();
        let keys: Vec<_> = outcome.counts.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unanimous() {
        let outcome = VoteOutcome::tally(&candidates(&["5", "5.0", "05"])).unwrap();
        assert!(outcome.is_unanimous());
        assert_eq!(outcome.agreement(), 1.0);
    }

    #[test]
    fn test_vote_summary() {
        let cs = candidates(&["7", "9", "7"]);
        let outcome = VoteOutcome::tally(&cs).unwrap();
        assert_eq!(outcome.vote_summary(&cs), "[#_#]");
    }
}
