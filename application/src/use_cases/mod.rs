//! Use cases orchestrating the domain logic through the ports.

pub mod run_batch;
pub mod solve_problem;
