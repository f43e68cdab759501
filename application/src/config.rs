//! Execution parameters for a run
//!
//! Invalid parameters are fatal at startup, before any problem is
//! processed; per-problem failures later in the run never abort the batch.

use std::time::Duration;
use tally_domain::{MatchPolicy, Strategy};
use thiserror::Error;

/// Configuration failures detected before a run starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Sample count must be at least 1 (got {0})")]
    InvalidSamples(usize),

    #[error("Temperature must be a finite, non-negative number (got {0})")]
    InvalidTemperature(f64),

    #[error("Per-sample timeout must be nonzero")]
    InvalidTimeout,
}

/// Validated execution parameters consumed by the use cases
#[derive(Debug, Clone, Copy)]
pub struct ExecutionParams {
    /// Number of samples per problem (N)
    pub samples: usize,
    /// Sampling temperature
    pub temperature: f64,
    /// Independent timeout applied to each sampling call
    pub timeout: Duration,
    /// Retry budget per sample slot (0 = no retries)
    pub retries: usize,
    /// Prompting strategy
    pub strategy: Strategy,
    /// Gold-answer comparison policy
    pub policy: MatchPolicy,
    /// Few-shot examples per prompt
    pub few_shot_k: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            samples: 5,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
            retries: 1,
            strategy: Strategy::Cot,
            policy: MatchPolicy::default(),
            few_shot_k: 2,
        }
    }
}

impl ExecutionParams {
    /// Validate the parameters; called once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples == 0 {
            return Err(ConfigError::InvalidSamples(self.samples));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}
