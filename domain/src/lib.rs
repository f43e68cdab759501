//! Domain layer for tally
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Self-consistency
//!
//! A problem is sampled several times at nonzero temperature; each raw model
//! response is reduced to a normalized [`AnswerKey`] and the keys are
//! majority-voted into a single [`VoteOutcome`].
//!
//! ## Normalization
//!
//! [`AnswerKey::parse`] is total: any string — numeric, textual, or garbage —
//! yields a deterministic key, so noisy model output can always be voted on.

pub mod answer;
pub mod core;
pub mod prompt;
pub mod strategy;
pub mod verify;
pub mod vote;

// Re-export commonly used types
pub use answer::{
    extract::{extract_code_answer, extract_final_answer},
    key::AnswerKey,
};
pub use core::{error::DomainError, prediction::Prediction, problem::Problem};
pub use prompt::PromptTemplate;
pub use strategy::Strategy;
pub use verify::{MatchPolicy, Verifier};
pub use vote::{candidate::Candidate, tally::VoteOutcome};
