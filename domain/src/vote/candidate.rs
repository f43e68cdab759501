//! Candidate answers for self-consistency voting

use crate::answer::key::AnswerKey;
use serde::{Deserialize, Serialize};

/// One sampled candidate answer for a problem
///
/// `index` is the original sample submission slot (0..N-1). Sampling may run
/// concurrently and complete out of order, but candidates are always fed to
/// the tally in ascending index order so the first-seen tie-break stays
/// deterministic.
///
/// # Example
///
/// ```
/// use tally_domain::Candidate;
///
/// let c = Candidate::new(0, "The answer is 3");
/// assert_eq!(c.key.as_str(), "3");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Original sample slot
    pub index: usize,
    /// Raw answer text as extracted from the model response
    pub raw: String,
    /// Normalized key derived from `raw`
    pub key: AnswerKey,
}

impl Candidate {
    /// Create a candidate, deriving its normalized key
    pub fn new(index: usize, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let key = AnswerKey::parse(&raw);
        Self { index, raw, key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_derives_key() {
        let c = Candidate::new(2, " $3,000 ");
        assert_eq!(c.index, 2);
        assert_eq!(c.raw, " $3,000 ");
        assert_eq!(c.key, AnswerKey::Numeric("3000".to_string()));
    }

    #[test]
    fn test_candidate_text_key() {
        let c = Candidate::new(0, "Paris");
        assert_eq!(c.key, AnswerKey::Text("paris".to_string()));
    }
}
