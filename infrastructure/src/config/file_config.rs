//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every field has a default so a partial (or absent) file still yields
//! a runnable configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tally_application::{ConfigError, ExecutionParams};
use tally_domain::{DomainError, MatchPolicy, Strategy};
use thiserror::Error;

/// Configuration that cannot be turned into runnable parameters
#[derive(Debug, Error)]
pub enum FileConfigError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Params(#[from] ConfigError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion provider settings
    pub provider: FileProviderConfig,
    /// Sampling and voting settings
    pub sampling: FileSamplingConfig,
    /// Few-shot retrieval settings
    pub few_shot: FileFewShotConfig,
    /// Gold-answer verification settings
    pub verification: FileVerificationConfig,
    /// Input and output file locations
    pub paths: FilePathsConfig,
}

impl FileConfig {
    /// Parse and validate the sampling sections into [`ExecutionParams`].
    ///
    /// Any failure here is fatal at startup: a run never begins with a
    /// half-valid configuration.
    pub fn execution_params(&self) -> Result<ExecutionParams, FileConfigError> {
        let strategy: Strategy = self.sampling.strategy.parse()?;
        let policy: MatchPolicy = self.verification.policy.parse()?;

        let params = ExecutionParams {
            samples: self.sampling.samples,
            temperature: self.sampling.temperature,
            timeout: Duration::from_secs(self.provider.timeout_secs),
            retries: self.sampling.retries,
            strategy,
            policy,
            few_shot_k: self.few_shot.k,
        };
        params.validate()?;
        Ok(params)
    }
}

/// `[provider]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of an OpenAI-compatible chat-completions endpoint
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Completion length cap
    pub max_tokens: u32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            api_key_env: "TALLY_API_KEY".to_string(),
            timeout_secs: 30,
            max_tokens: 1024,
        }
    }
}

/// `[sampling]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSamplingConfig {
    /// Samples drawn per problem
    pub samples: usize,
    /// Sampling temperature
    pub temperature: f64,
    /// Retries per sample slot
    pub retries: usize,
    /// Prompting strategy ("cot" or "pal")
    pub strategy: String,
}

impl Default for FileSamplingConfig {
    fn default() -> Self {
        Self {
            samples: 5,
            temperature: 0.7,
            retries: 1,
            strategy: "cot".to_string(),
        }
    }
}

/// `[few_shot]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFewShotConfig {
    /// Examples retrieved per prompt
    pub k: usize,
}

impl Default for FileFewShotConfig {
    fn default() -> Self {
        Self { k: 2 }
    }
}

/// `[verification]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVerificationConfig {
    /// Comparison policy ("exact", "tolerance", or "tolerance:REL")
    pub policy: String,
}

impl Default for FileVerificationConfig {
    fn default() -> Self {
        Self {
            policy: "tolerance".to_string(),
        }
    }
}

/// `[paths]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathsConfig {
    /// Problems to solve
    pub test_data: String,
    /// Training split for few-shot retrieval
    pub train_data: String,
    /// Prediction CSV output
    pub predictions: String,
    /// JSONL trace output
    pub traces: String,
}

impl Default for FilePathsConfig {
    fn default() -> Self {
        Self {
            test_data: "data/test.csv".to_string(),
            train_data: "data/train.csv".to_string(),
            predictions: "output/predictions.csv".to_string(),
            traces: "output/traces.jsonl".to_string(),
        }
    }
}
