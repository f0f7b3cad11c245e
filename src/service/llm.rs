//! Reasoning service client
//!
//! Sends a framed argument to an OpenAI-compatible chat-completion endpoint
//! (OpenRouter by default) and returns the raw text of the top reply.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::model::ReasoningConfig;
use crate::model::completion::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Sampling temperature for every call; identical input must give identical framing
pub const REASONING_TEMPERATURE: f32 = 0.0;

/// Longest slice of an upstream error body kept in errors and logs
const MAX_ERROR_BODY_CHARS: usize = 500;

/// System instructions plus the caller's argument, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningRequest {
    pub system: &'static str,
    pub user: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider error: {0}")]
    Provider(String),

    #[error("failed to decode completion response: {0}")]
    InvalidBody(String),

    #[error("empty reply from reasoning service")]
    EmptyReply,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    #[error("invalid reasoning base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Text in, text out, may fail
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Perform one completion call; never retried
    async fn complete(&self, request: &ReasoningRequest) -> Result<String, TransportError>;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    referer: String,
    title: String,
    timeout: Duration,
}

impl ChatCompletionsClient {
    /// Create a client from the reasoning configuration and a credential
    ///
    /// The configured timeout bounds the whole call, body included.
    pub fn new(api_key: &str, config: &ReasoningConfig) -> Result<Self, ClientInitError> {
        let endpoint = Url::parse(&format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        ))?;
        let timeout = config.timeout();
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model: config.model.clone(),
            referer: config.referer.clone(),
            title: config.title.clone(),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Http(err)
        }
    }

    async fn send(&self, request: &ReasoningRequest) -> Result<String, TransportError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: REASONING_TEMPERATURE,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| TransportError::InvalidBody(e.to_string()))?;

        if let Some(error) = completion.error.as_ref() {
            return Err(TransportError::Provider(error.message.clone()));
        }

        completion
            .into_top_content()
            .filter(|content| !content.trim().is_empty())
            .ok_or(TransportError::EmptyReply)
    }
}

#[async_trait]
impl ReasoningClient for ChatCompletionsClient {
    async fn complete(&self, request: &ReasoningRequest) -> Result<String, TransportError> {
        let start_time = Instant::now();

        tracing::debug!(
            model = %self.model,
            prompt_length = request.user.len(),
            "Initiating reasoning service call"
        );

        let result = self.send(request).await;
        let elapsed = start_time.elapsed();

        match &result {
            Ok(reply) => tracing::info!(
                model = %self.model,
                elapsed_ms = elapsed.as_millis(),
                reply_length = reply.len(),
                "Reasoning service call completed successfully"
            ),
            Err(e) => tracing::error!(
                model = %self.model,
                elapsed_ms = elapsed.as_millis(),
                error = %e,
                "Reasoning service call failed"
            ),
        }

        result
    }
}
