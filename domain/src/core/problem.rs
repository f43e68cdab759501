//! Problem value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A single problem to be solved (Value Object)
///
/// Immutable once loaded from the dataset. The `gold` answer is optional:
/// test splits usually carry only the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    id: usize,
    question: String,
    gold: Option<String>,
}

impl Problem {
    /// Create a new problem
    ///
    /// # Panics
    /// Panics if the question is empty or only whitespace
    pub fn new(id: usize, question: impl Into<String>) -> Self {
        let question = question.into();
        assert!(!question.trim().is_empty(), "Question cannot be empty");
        Self {
            id,
            question,
            gold: None,
        }
    }

    /// Try to create a new problem, rejecting blank questions
    pub fn try_new(id: usize, question: impl Into<String>) -> Result<Self, DomainError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(DomainError::InvalidProblem(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            question,
            gold: None,
        })
    }

    /// Attach a gold answer for scoring
    pub fn with_gold(mut self, gold: impl Into<String>) -> Self {
        self.gold = Some(gold.into());
        self
    }

    /// Dataset row index of this problem
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get the question text
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Get the gold answer, if the dataset provides one
    pub fn gold(&self) -> Option<&str> {
        self.gold.as_deref()
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.question)
    }
}
