//! Model provider backends

use crate::errors::BackendError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

pub const DEFAULT_ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One single-turn completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A language model service that turns one prompt into one text reply.
///
/// Implementations make exactly one upstream call per `complete` and do not
/// retry.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Send the prompt and return the reply text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;
}

async fn read_json(response: reqwest::Response) -> Result<Value, BackendError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

/// Anthropic Messages API backend
#[derive(Debug, Clone)]
pub struct AnthropicBackend {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl AnthropicBackend {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Use `ANTHROPIC_API_BASE` and `ANTHROPIC_API_KEY` from the environment
    pub fn from_env(client: reqwest::Client) -> Self {
        let api_base = std::env::var("ANTHROPIC_API_BASE")
            .unwrap_or_else(|_| DEFAULT_ANTHROPIC_API_BASE.to_string());
        Self::new(client, api_base, std::env::var("ANTHROPIC_API_KEY").ok())
    }

    pub fn request_body(request: &CompletionRequest) -> Value {
        json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [
                { "role": "user", "content": request.prompt }
            ],
        })
    }

    /// Text of the first `text` content block
    pub fn reply_text(response: &Value) -> Result<String, BackendError> {
        response["content"]
            .as_array()
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|block| block["type"] == "text")
                    .and_then(|block| block["text"].as_str())
            })
            .map(str::to_string)
            .ok_or_else(|| BackendError::NoContent("no text block in message content".to_string()))
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| BackendError::MissingApiKey(self.name().to_string()))?;

        debug!(model = %request.model, "calling Anthropic messages API");
        let response = self
            .client
            .post(format!("{}/messages", self.api_base))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&Self::request_body(request))
            .send()
            .await?;

        let body = read_json(response).await?;
        Self::reply_text(&body)
    }
}

/// OpenAI-compatible chat completions backend
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl OpenAiBackend {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Use `OPENAI_API_BASE` and `OPENAI_API_KEY` from the environment
    pub fn from_env(client: reqwest::Client) -> Self {
        let api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string());
        Self::new(client, api_base, std::env::var("OPENAI_API_KEY").ok())
    }

    pub fn request_body(request: &CompletionRequest) -> Value {
        json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [
                { "role": "user", "content": request.prompt }
            ],
        })
    }

    pub fn reply_text(response: &Value) -> Result<String, BackendError> {
        let choice = response["choices"]
            .get(0)
            .ok_or_else(|| BackendError::NoContent("no choices in response".to_string()))?;

        choice["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| BackendError::NoContent("choice has no message content".to_string()))
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| BackendError::MissingApiKey(self.name().to_string()))?;

        debug!(model = %request.model, "calling chat completions API");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&Self::request_body(request))
            .send()
            .await?;

        let body = read_json(response).await?;
        Self::reply_text(&body)
    }
}
