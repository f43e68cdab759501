//! Completion gateway port
//!
//! Defines the interface for the remote text-completion endpoint. The
//! endpoint is opaque, network-bound, rate-limited, and non-deterministic
//! across calls at nonzero temperature.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion call
///
/// All of these are recoverable at the sample level: a failed call simply
/// contributes no candidate for its slot.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request timed out")]
    Timeout,

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Gateway misconfigured: {0}")]
    Configuration(String),
}

/// One sampling request to the completion endpoint
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (strategy-specific instructions)
    pub system: String,
    /// User prompt (few-shot examples + target question)
    pub user: String,
    /// Sampling temperature; nonzero for self-consistency diversity
    pub temperature: f64,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>, temperature: f64) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
        }
    }
}

/// Gateway for text completion
///
/// This port defines how the application layer talks to the LLM provider.
/// Implementations (adapters) live in the infrastructure layer and must be
/// safe for concurrent use: the N samples for one problem are issued in
/// parallel against a single shared gateway.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send one completion request and return the raw response text
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}
