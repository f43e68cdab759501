//! Verification of predicted answers against gold answers
//!
//! Comparison policy is configurable rather than hard-coded: exact key
//! equality, or a small numeric tolerance that absorbs formatting-invisible
//! float drift (3 vs 3.0000001).

use crate::answer::key::AnswerKey;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Policy for deciding when two answer keys match
///
/// # Example
///
/// ```
/// use tally_domain::{AnswerKey, MatchPolicy};
///
/// let a = AnswerKey::parse("3");
/// let b = AnswerKey::parse("3.0000001");
///
/// assert!(!MatchPolicy::Exact.matches(&a, &b));
/// assert!(MatchPolicy::default().matches(&a, &b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Canonical key strings must be identical
    Exact,
    /// Numeric keys match within `abs + rel * max(|a|, |b|)`;
    /// text keys still require exact equality
    Tolerance { rel: f64, abs: f64 },
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Tolerance {
            rel: 1e-6,
            abs: 1e-9,
        }
    }
}

impl MatchPolicy {
    /// Check whether two keys match under this policy.
    ///
    /// Numeric and text keys never match each other regardless of policy.
    pub fn matches(&self, predicted: &AnswerKey, gold: &AnswerKey) -> bool {
        match (self, predicted, gold) {
            (MatchPolicy::Exact, a, b) => a == b,
            (
                MatchPolicy::Tolerance { rel, abs },
                AnswerKey::Numeric(_),
                AnswerKey::Numeric(_),
            ) => match (predicted.value(), gold.value()) {
                (Some(a), Some(b)) => (a - b).abs() <= abs + rel * a.abs().max(b.abs()),
                _ => predicted == gold,
            },
            (MatchPolicy::Tolerance { .. }, a, b) => a == b,
        }
    }

    /// Human-readable description of this policy
    pub fn description(&self) -> String {
        match self {
            MatchPolicy::Exact => "exact key equality".to_string(),
            MatchPolicy::Tolerance { rel, abs } => {
                format!("numeric tolerance (rel {}, abs {})", rel, abs)
            }
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for MatchPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(MatchPolicy::Exact),
            "tolerance" => Ok(MatchPolicy::default()),
            s if s.starts_with("tolerance:") => {
                let rel: f64 = s
                    .split(':')
                    .nth(1)
                    .ok_or_else(|| {
                        DomainError::InvalidMatchPolicy("missing tolerance value".to_string())
                    })?
                    .parse()
                    .map_err(|_| {
                        DomainError::InvalidMatchPolicy(format!("bad tolerance in '{}'", s))
                    })?;
                Ok(MatchPolicy::Tolerance { rel, abs: 1e-9 })
            }
            other => Err(DomainError::InvalidMatchPolicy(format!(
                "unknown policy '{}'. Valid: exact, tolerance, tolerance:REL",
                other
            ))),
        }
    }
}

/// Compares predictions against gold answers under a fixed policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Verifier {
    policy: MatchPolicy,
}

impl Verifier {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// The policy this verifier applies
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Normalize a raw gold answer and compare the predicted key against it
    pub fn check(&self, predicted: &AnswerKey, gold_raw: &str) -> bool {
        let gold = AnswerKey::parse(gold_raw);
        self.policy.matches(predicted, &gold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_policy() {
        let policy = MatchPolicy::Exact;
        assert!(policy.matches(&AnswerKey::parse("3"), &AnswerKey::parse("3.0")));
        assert!(!policy.matches(&AnswerKey::parse("3"), &AnswerKey::parse("3.0000001")));
        assert!(policy.matches(&AnswerKey::parse("paris"), &AnswerKey::parse("Paris!")));
    }

    #[test]
    fn test_tolerance_policy_absorbs_float_drift() {
        let policy = MatchPolicy::default();
        assert!(policy.matches(&AnswerKey::parse("3"), &AnswerKey::parse("3.0000001")));
        assert!(!policy.matches(&AnswerKey::parse("3"), &AnswerKey::parse("3.1")));
    }

    #[test]
    fn test_variants_never_cross_match() {
        let policy = MatchPolicy::default();
        assert!(!policy.matches(&AnswerKey::parse("3"), &AnswerKey::parse("three")));
        assert!(!MatchPolicy::Exact.matches(&AnswerKey::parse("3"), &AnswerKey::parse("three")));
    }

    #[test]
    fn test_text_keys_under_tolerance_still_exact() {
        let policy = MatchPolicy::default();
        assert!(policy.matches(&AnswerKey::parse("Paris"), &AnswerKey::parse("paris.")));
        assert!(!policy.matches(&AnswerKey::parse("paris"), &AnswerKey::parse("london")));
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("exact".parse::<MatchPolicy>().ok(), Some(MatchPolicy::Exact));
        assert_eq!(
            "tolerance".parse::<MatchPolicy>().ok(),
            Some(MatchPolicy::default())
        );
        assert_eq!(
            "tolerance:0.001".parse::<MatchPolicy>().ok(),
            Some(MatchPolicy::Tolerance {
                rel: 0.001,
                abs: 1e-9
            })
        );
        assert!("fuzzy".parse::<MatchPolicy>().is_err());
    }

    #[test]
    fn test_verifier_end_to_end() {
        let verifier = Verifier::default();
        assert!(verifier.check(&AnswerKey::parse("x = 3"), "3"));
        assert!(!verifier.check(&AnswerKey::parse("4"), "3"));
    }
}
