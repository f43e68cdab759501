//! Run-batch use case
//!
//! Walks the problem list, solving and verifying each in turn. One
//! problem's failures never abort the run: they degrade to unresolved
//! predictions and the batch continues.

use crate::config::ExecutionParams;
use crate::ports::completion::CompletionGateway;
use crate::ports::progress::ProgressNotifier;
use crate::ports::retriever::ExampleRetriever;
use crate::ports::trace_sink::TraceSink;
use crate::use_cases::solve_problem::SolveProblemUseCase;
use serde::Serialize;
use std::sync::Arc;
use tally_domain::{Prediction, Problem, Verifier};
use tracing::info;

/// Aggregate statistics over one batch run
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BatchStats {
    /// Problems processed
    pub total: usize,
    /// Problems with at least one surviving candidate
    pub resolved: usize,
    /// Problems whose sampling attempts all failed
    pub unresolved: usize,
    /// Problems that had a gold answer to score against
    pub scored: usize,
    /// Scored problems whose prediction matched the gold answer
    pub correct: usize,
}

impl BatchStats {
    /// Fraction of problems that produced an answer
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.resolved as f64 / self.total as f64
        }
    }

    /// Accuracy over scored problems, when any were scored
    pub fn accuracy(&self) -> Option<f64> {
        if self.scored == 0 {
            None
        } else {
            Some(self.correct as f64 / self.scored as f64)
        }
    }
}

/// Complete result of a batch run
#[derive(Debug)]
pub struct BatchReport {
    /// One prediction per problem, in input order
    pub predictions: Vec<Prediction>,
    pub stats: BatchStats,
}

/// Use case for running a whole dataset through the solver
pub struct RunBatchUseCase<G: CompletionGateway + 'static> {
    solver: SolveProblemUseCase<G>,
    verifier: Verifier,
    few_shot_k: usize,
}

impl<G: CompletionGateway + 'static> RunBatchUseCase<G> {
    pub fn new(gateway: Arc<G>, params: ExecutionParams) -> Self {
        let verifier = Verifier::new(params.policy);
        let few_shot_k = params.few_shot_k;
        Self {
            solver: SolveProblemUseCase::new(gateway, params),
            verifier,
            few_shot_k,
        }
    }

    /// Process every problem, preserving input order in the report.
    pub async fn execute(
        &self,
        problems: &[Problem],
        retriever: &dyn ExampleRetriever,
        progress: &dyn ProgressNotifier,
        trace: &dyn TraceSink,
    ) -> BatchReport {
        info!(
            "Starting batch of {} problems ({} samples each)",
            problems.len(),
            self.solver.params().samples
        );
        progress.on_batch_start(problems.len());

        let mut predictions = Vec::with_capacity(problems.len());
        let mut stats = BatchStats::default();

        for problem in problems {
            let few_shots = retriever.retrieve(problem.question(), self.few_shot_k);
            let mut prediction = self.solver.execute(problem, &few_shots, progress, trace).await;

            stats.total += 1;
            if prediction.resolved {
                stats.resolved += 1;
            } else {
                stats.unresolved += 1;
            }

            if let (true, Some(gold), Some(key)) =
                (prediction.resolved, problem.gold(), prediction.key.as_ref())
            {
                let correct = self.verifier.check(key, gold);
                stats.scored += 1;
                if correct {
                    stats.correct += 1;
                }
                prediction = prediction.with_correct(correct);
            }

            predictions.push(prediction);
        }

        progress.on_batch_complete();
        info!(
            "Batch complete: {}/{} resolved, accuracy {}",
            stats.resolved,
            stats.total,
            stats
                .accuracy()
                .map(|a| format!("{:.1}%", a * 100.0))
                .unwrap_or_else(|| "n/a".to_string())
        );

        BatchReport { predictions, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion::{CompletionRequest, GatewayError};
    use crate::ports::progress::NoProgress;
    use crate::ports::retriever::NoExamples;
    use crate::ports::trace_sink::NoTraceSink;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Gateway that answers every call with a fixed trace, except that
    /// questions containing "FAIL" always error.
    struct FixedGateway {
        answer: &'static str,
    }

    #[async_trait]
    impl CompletionGateway for FixedGateway {
        async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
            if request.user.contains("FAIL") {
                return Err(GatewayError::RequestFailed("scripted failure".to_string()));
            }
            Ok(format!("step by step\n#### {}", self.answer))
        }
    }

    fn params() -> ExecutionParams {
        ExecutionParams {
            samples: 3,
            retries: 0,
            timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_batch_scores_against_gold() {
        let gateway = Arc::new(FixedGateway { answer: "3" });
        let batch = RunBatchUseCase::new(gateway, params());
        let problems = vec![
            Problem::new(0, "If 3x+2=11, what is x?").with_gold("3"),
            Problem::new(1, "What is 2+2?").with_gold("4"),
            Problem::new(2, "ungraded question"),
        ];

        let report = batch
            .execute(&problems, &NoExamples, &NoProgress, &NoTraceSink)
            .await;

        assert_eq!(report.predictions.len(), 3);
        assert_eq!(report.stats.total, 3);
        assert_eq!(report.stats.resolved, 3);
        assert_eq!(report.stats.scored, 2);
        assert_eq!(report.stats.correct, 1);
        assert_eq!(report.stats.accuracy(), Some(0.5));
        assert_eq!(report.predictions[0].correct, Some(true));
        assert_eq!(report.predictions[1].correct, Some(false));
        assert_eq!(report.predictions[2].correct, None);
    }

    #[tokio::test]
    async fn test_one_bad_problem_never_aborts_the_batch() {
        let gateway = Arc::new(FixedGateway { answer: "1" });
        let batch = RunBatchUseCase::new(gateway, params());
        let problems = vec![
            Problem::new(0, "fine"),
            Problem::new(1, "FAIL on purpose"),
            Problem::new(2, "also fine"),
        ];

        let report = batch
            .execute(&problems, &NoExamples, &NoProgress, &NoTraceSink)
            .await;

        assert_eq!(report.stats.total, 3);
        assert_eq!(report.stats.resolved, 2);
        assert_eq!(report.stats.unresolved, 1);
        assert!(!report.predictions[1].resolved);
        // Order preserved
        let ids: Vec<_> = report.predictions.iter().map(|p| p.problem_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let gateway = Arc::new(FixedGateway { answer: "1" });
        let batch = RunBatchUseCase::new(gateway, params());

        let report = batch
            .execute(&[], &NoExamples, &NoProgress, &NoTraceSink)
            .await;

        assert!(report.predictions.is_empty());
        assert_eq!(report.stats.coverage(), 0.0);
        assert_eq!(report.stats.accuracy(), None);
    }
}
