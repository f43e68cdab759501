//! Core domain types: problems, predictions, and errors.

pub mod error;
pub mod prediction;
pub mod problem;
