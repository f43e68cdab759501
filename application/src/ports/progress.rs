//! Progress notification port
//!
//! Defines the interface for reporting progress during a run.

/// Callback for progress updates during sampling and batch execution
///
/// Implementations live in the presentation layer and can display progress
/// in various ways (progress bars, plain console lines).
pub trait ProgressNotifier: Send + Sync {
    /// Called once when a batch starts
    fn on_batch_start(&self, total_problems: usize);

    /// Called when sampling for a problem starts
    fn on_problem_start(&self, problem_id: usize, samples: usize);

    /// Called when one sample slot finishes (successfully or not)
    fn on_sample_complete(&self, problem_id: usize, sample_index: usize, success: bool);

    /// Called when a problem's vote is decided
    fn on_problem_complete(&self, problem_id: usize, resolved: bool);

    /// Called once when the batch finishes
    fn on_batch_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_batch_start(&self, _total_problems: usize) {}
    fn on_problem_start(&self, _problem_id: usize, _samples: usize) {}
    fn on_sample_complete(&self, _problem_id: usize, _sample_index: usize, _success: bool) {}
    fn on_problem_complete(&self, _problem_id: usize, _resolved: bool) {}
}
