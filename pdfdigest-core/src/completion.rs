//! Completion-service HTTP client.
//!
//! A thin, injected client for an OpenAI-compatible chat-completions
//! endpoint. One synchronous (non-streaming) request per call, a bounded
//! timeout, and typed errors. The client is constructed once at startup
//! from [`CompletionConfig`] and passed by reference wherever it is needed.

use crate::config::CompletionConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur when calling the completion service
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("No API key configured")]
    MissingKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Request failed: {0}")]
    Http(reqwest::Error),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Completion service returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(reqwest::Error),

    #[error("Completion response contained no choices")]
    EmptyResponse,
}

/// Chat message in the completion wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Client for the external completion service
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl CompletionClient {
    /// Build a client from configuration
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CompletionError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Whether a credential is configured. Without one the summarizer
    /// stays in mock mode and never calls [`complete`](Self::complete).
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Issue one non-streaming chat completion: a system instruction plus
    /// a user message. Returns the first choice's text verbatim.
    #[instrument(skip(self, instruction, input), fields(model = %self.model, input_len = input.len()))]
    pub async fn complete(
        &self,
        instruction: &str,
        input: &str,
    ) -> Result<String, CompletionError> {
        let key = self.api_key.as_deref().ok_or(CompletionError::MissingKey)?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(instruction),
                ChatMessage::user(input),
            ],
            stream: false,
        };

        debug!("Calling completion service at {}", self.base_url);

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(self.timeout_secs)
                } else {
                    CompletionError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(CompletionError::MalformedResponse)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}
