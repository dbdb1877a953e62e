//! LLM Client — the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call the generation API directly.
//! Handlers depend on the `ArticleGenerator` trait, never on `LlmClient`.
//!
//! One attempt per request. Failures are folded into `LlmError` before they
//! leave this module, and upstream response bodies are never kept.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("generation API credential is missing or was rejected")]
    Auth,

    #[error("generation API rate limit or quota reached")]
    RateLimited,

    #[error("generation API transport failure: {0}")]
    Transport(String),
}

/// Immutable description of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub persona_label: String,
    pub source_text: String,
    pub system_instruction: String,
    pub user_instruction: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Produces article text from a prompt. Swapped for fakes in tests.
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError>;
}

/// Connection settings for `LlmClient`.
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// API root without trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Chat-completions client for OpenAI-compatible APIs.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl ArticleGenerator for LlmClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::Auth)?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_instruction,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(describe_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            // The body can echo request details; keep it out of the error value.
            let upstream_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Generation API request failed");
            debug!("Generation API error body: {upstream_body}");
            return Err(classify_status(status));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|_| LlmError::Transport("malformed completion response".to_string()))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Generation succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::Transport("empty completion".to_string()))
    }
}

fn classify_status(status: StatusCode) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth,
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
        other => LlmError::Transport(format!("upstream returned status {}", other.as_u16())),
    }
}

fn describe_transport_error(e: reqwest::Error) -> LlmError {
    let kind = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    LlmError::Transport(kind.to_string())
}
