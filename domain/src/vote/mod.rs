//! Self-consistency voting: candidates and the majority tally.

pub mod candidate;
pub mod tally;
