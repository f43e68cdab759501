//! Solve-one-problem use case: self-consistency sampling
//!
//! Issues N sampling calls concurrently, reassembles the survivors in
//! original submission order, and majority-votes their normalized answers.
//! The submission order is what fixes the tie-break: execution may complete
//! out of order, but candidates always reach the tally sorted by slot.

use crate::config::ExecutionParams;
use crate::ports::completion::{CompletionGateway, CompletionRequest, GatewayError};
use crate::ports::progress::ProgressNotifier;
use crate::ports::trace_sink::{TraceEvent, TraceSink};
use std::sync::Arc;
use tally_domain::{
    Candidate, Prediction, Problem, PromptTemplate, Strategy, VoteOutcome, extract_code_answer,
    extract_final_answer,
};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Use case for solving a single problem by self-consistency
pub struct SolveProblemUseCase<G: CompletionGateway + 'static> {
    gateway: Arc<G>,
    params: ExecutionParams,
}

impl<G: CompletionGateway + 'static> SolveProblemUseCase<G> {
    pub fn new(gateway: Arc<G>, params: ExecutionParams) -> Self {
        Self { gateway, params }
    }

    /// The parameters this use case runs with
    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Sample the problem N times and vote.
    ///
    /// Never fails: when every slot fails upstream the result is the
    /// explicit unresolved prediction, and the caller moves on.
    pub async fn execute(
        &self,
        problem: &Problem,
        few_shots: &[String],
        progress: &dyn ProgressNotifier,
        trace: &dyn TraceSink,
    ) -> Prediction {
        progress.on_problem_start(problem.id(), self.params.samples);

        let request = CompletionRequest::new(
            PromptTemplate::system_for(self.params.strategy),
            PromptTemplate::query_for(self.params.strategy, problem.question(), few_shots),
            self.params.temperature,
        );

        let mut join_set = JoinSet::new();
        for index in 0..self.params.samples {
            let gateway = Arc::clone(&self.gateway);
            let request = request.clone();
            let per_call = self.params.timeout;
            let retries = self.params.retries;

            join_set.spawn(async move {
                let result = Self::sample_slot(&gateway, request, per_call, retries).await;
                (index, result)
            });
        }

        // Collect out-of-order completions, then restore submission order so
        // the first-seen tie-break is deterministic.
        let mut responses: Vec<(usize, String)> = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(text))) => {
                    progress.on_sample_complete(problem.id(), index, true);
                    responses.push((index, text));
                }
                Ok((index, Err(e))) => {
                    warn!("Problem {} sample {} failed: {}", problem.id(), index, e);
                    progress.on_sample_complete(problem.id(), index, false);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }
        responses.sort_by_key(|(index, _)| *index);

        let candidates = self.extract_candidates(&responses);

        let prediction = match VoteOutcome::tally(&candidates) {
            Ok(outcome) => {
                debug!(
                    "Problem {}: winner '{}' agreement {:.2} {}",
                    problem.id(),
                    outcome.key,
                    outcome.agreement(),
                    outcome.vote_summary(&candidates)
                );
                Prediction::resolved(problem.id(), outcome, candidates)
            }
            Err(_) => {
                warn!("Problem {}: no candidates survived sampling", problem.id());
                Prediction::unresolved(problem.id())
            }
        };

        trace.record(TraceEvent::new(
            "problem_trace",
            serde_json::json!({
                "problem_id": problem.id(),
                "question": problem.question(),
                "strategy": self.params.strategy.as_str(),
                "candidates": prediction
                    .candidates
                    .iter()
                    .map(|c| c.raw.clone())
                    .collect::<Vec<_>>(),
                "winning_key": prediction.key,
                "agreement": prediction.agreement,
            }),
        ));

        progress.on_problem_complete(problem.id(), prediction.resolved);
        prediction
    }

    /// Run one sample slot: per-call timeout, optional retries in the same
    /// slot. A slot that exhausts its budget contributes no candidate.
    async fn sample_slot(
        gateway: &G,
        request: CompletionRequest,
        per_call: std::time::Duration,
        retries: usize,
    ) -> Result<String, GatewayError> {
        let mut last = GatewayError::Timeout;
        for attempt in 0..=retries {
            match timeout(per_call, gateway.complete(request.clone())).await {
                Ok(Ok(text)) => return Ok(text),
                Ok(Err(e)) => {
                    debug!("Sample attempt {} failed: {}", attempt + 1, e);
                    last = e;
                }
                Err(_) => {
                    debug!("Sample attempt {} timed out", attempt + 1);
                    last = GatewayError::Timeout;
                }
            }
        }
        Err(last)
    }

    /// Extract one candidate per successful response, keeping slot indices.
    /// Extraction failures are diagnostics, not errors.
    fn extract_candidates(&self, responses: &[(usize, String)]) -> Vec<Candidate> {
        responses
            .iter()
            .filter_map(|(index, text)| {
                let raw = match self.params.strategy {
                    Strategy::Cot => extract_final_answer(text),
                    Strategy::Pal => extract_code_answer(text),
                };
                match raw {
                    Some(raw) => Some(Candidate::new(*index, raw)),
                    None => {
                        debug!("Sample {} produced no extractable answer", index);
                        None
                    }
                }
            })
            .collect()
    }
}
