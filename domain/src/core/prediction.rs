//! Prediction value object - the immutable per-problem result

use crate::answer::key::AnswerKey;
use crate::vote::candidate::Candidate;
use crate::vote::tally::VoteOutcome;
use serde::{Deserialize, Serialize};

/// Final result for one problem, written once and never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Problem id (dataset row index)
    pub problem_id: usize,
    /// Whether any candidate survived sampling; an unresolved prediction
    /// carries an empty answer and agreement 0
    pub resolved: bool,
    /// Raw representative of the winning answer
    pub answer: String,
    /// Normalized winning key (absent when unresolved)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<AnswerKey>,
    /// Fraction of candidates that voted for the winner
    pub agreement: f64,
    /// Verification result against the gold answer, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    /// Full candidate trace, in sample order
    pub candidates: Vec<Candidate>,
}

impl Prediction {
    /// Build a resolved prediction from a vote outcome
    pub fn resolved(problem_id: usize, outcome: VoteOutcome, candidates: Vec<Candidate>) -> Self {
        Self {
            problem_id,
            resolved: true,
            answer: outcome.raw.clone(),
            agreement: outcome.agreement(),
            key: Some(outcome.key),
            correct: None,
            candidates,
        }
    }

    /// Build the explicit "no candidates" prediction for a problem whose
    /// sampling attempts all failed
    pub fn unresolved(problem_id: usize) -> Self {
        Self {
            problem_id,
            resolved: false,
            answer: String::new(),
            key: None,
            agreement: 0.0,
            correct: None,
            candidates: Vec::new(),
        }
    }

    /// Attach a verification verdict
    pub fn with_correct(mut self, correct: bool) -> Self {
        self.correct = Some(correct);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_prediction() {
        let candidates = vec![Candidate::new(0, "7"), Candidate::new(1, "7")];
        let outcome = VoteOutcome::tally(&candidates).unwrap();
        let p = Prediction::resolved(3, outcome, candidates);

        assert!(p.resolved);
        assert_eq!(p.problem_id, 3);
        assert_eq!(p.answer, "7");
        assert_eq!(p.agreement, 1.0);
        assert_eq!(p.candidates.len(), 2);
    }

    #[test]
    fn test_unresolved_prediction() {
        let p = Prediction::unresolved(9);
        assert!(!p.resolved);
        assert!(p.answer.is_empty());
        assert_eq!(p.agreement, 0.0);
        assert!(p.key.is_none());
        assert!(p.correct.is_none());
    }

    #[test]
    fn test_with_correct() {
        let p = Prediction::unresolved(0).with_correct(false);
        assert_eq!(p.correct, Some(false));
    }
}
