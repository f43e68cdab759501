//! OpenAI-compatible chat-completions gateway
//!
//! Speaks the `/chat/completions` JSON dialect used by OpenAI, Groq, and
//! most self-hosted servers. Rate limits (HTTP 429) and transient server
//! errors are retried with bounded exponential backoff; everything else
//! surfaces as a [`GatewayError`] and costs the sample its slot.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tally_application::{CompletionGateway, CompletionRequest, GatewayError};
use tracing::{debug, warn};

/// Attempts per HTTP call before giving up on backoff
const MAX_HTTP_ATTEMPTS: u32 = 3;

/// Gateway for OpenAI-compatible chat-completion endpoints
///
/// The inner `reqwest::Client` is an Arc internally, so one gateway is
/// safely shared across the N concurrent sampling tasks.
pub struct OpenAiChatGateway {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
}

impl OpenAiChatGateway {
    /// Create a gateway.
    ///
    /// `api_key` is optional: local servers often run unauthenticated.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        request_timeout: Duration,
        max_tokens: u32,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            max_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn body(&self, request: &CompletionRequest) -> ChatCompletionBody {
        ChatCompletionBody {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user.clone(),
                },
            ],
            temperature: request.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionGateway for OpenAiChatGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let body = self.body(&request);

        for attempt in 0..MAX_HTTP_ATTEMPTS {
            let mut http = self.client.post(self.endpoint()).json(&body);
            if let Some(key) = &self.api_key {
                http = http.bearer_auth(key);
            }

            let response = match http.send().await {
                Ok(r) => r,
                Err(e) if e.is_timeout() => return Err(GatewayError::Timeout),
                Err(e) => return Err(GatewayError::RequestFailed(e.to_string())),
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                if attempt + 1 == MAX_HTTP_ATTEMPTS {
                    return if status.as_u16() == 429 {
                        Err(GatewayError::RateLimited)
                    } else {
                        Err(GatewayError::RequestFailed(format!("HTTP {}", status)))
                    };
                }
                // Exponential backoff: 1s, 2s, 4s
                let wait = Duration::from_secs(1 << attempt);
                warn!("Provider returned {}, backing off {:?}", status, wait);
                tokio::time::sleep(wait).await;
                continue;
            }

            if !status.is_success() {
                return Err(GatewayError::RequestFailed(format!("HTTP {}", status)));
            }

            let parsed: ChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

            let content = parsed
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or_else(|| GatewayError::InvalidResponse("empty choices".to_string()))?;

            debug!("Completion received ({} bytes)", content.len());
            return Ok(content);
        }

        Err(GatewayError::RateLimited)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
