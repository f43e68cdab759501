//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No candidates to vote on")]
    NoCandidates,

    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Invalid match policy: {0}")]
    InvalidMatchPolicy(String),

    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),
}

impl DomainError {
    /// Check if this error represents the explicit zero-candidate condition
    pub fn is_no_candidates(&self) -> bool {
        matches!(self, DomainError::NoCandidates)
    }
}
