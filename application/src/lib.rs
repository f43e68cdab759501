//! Application layer for tally
//!
//! This crate contains the use cases (self-consistency sampling, batch
//! running) and the ports they depend on. Adapters for the ports live in
//! the infrastructure layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConfigError, ExecutionParams};
pub use ports::{
    completion::{CompletionGateway, CompletionRequest, GatewayError},
    progress::{NoProgress, ProgressNotifier},
    retriever::{ExampleRetriever, NoExamples},
    trace_sink::{NoTraceSink, TraceEvent, TraceSink},
};
pub use use_cases::{
    run_batch::{BatchReport, BatchStats, RunBatchUseCase},
    solve_problem::SolveProblemUseCase,
};
