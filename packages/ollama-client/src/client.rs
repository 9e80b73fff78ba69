//! Ollama HTTP client

use std::time::Duration;

use cadence_shared_config::OllamaConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{OllamaError, OllamaResult};
use crate::models::{ChatBody, ChatMessage, ChatReply, PromptBody, PromptReply, Sampling};

const GENERATE_ROUTE: &str = "api/generate";
const CHAT_ROUTE: &str = "api/chat";

/// Longest error body kept in [`OllamaError::Api`]
const MAX_ERROR_BODY_CHARS: usize = 1000;

/// How often and how patiently transient failures are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; 0 behaves like 1
    pub attempts: u32,
    /// Delay before the second attempt, doubled for each one after
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const NONE: Self = Self {
        attempts: 1,
        base_delay: Duration::ZERO,
    };

    fn delay_before(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Client for a local Ollama server.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http_client: Client,
    config: OllamaConfig,
    retry: RetryPolicy,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> OllamaResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(2)
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn sampling(&self) -> Sampling {
        Sampling {
            temperature: self.config.temperature,
            num_predict: self.config.max_tokens,
        }
    }

    /// One-shot completion of `prompt`
    pub async fn generate(&self, prompt: &str) -> OllamaResult<String> {
        let body = PromptBody {
            model: &self.config.model,
            prompt,
            stream: false,
            options: self.sampling(),
        };
        debug!(model = %self.config.model, prompt_chars = prompt.len(), "Generating");

        let reply: PromptReply = self.post(GENERATE_ROUTE, &body).await?;
        Ok(reply.response)
    }

    /// Next assistant message for a conversation
    pub async fn chat(&self, messages: &[ChatMessage]) -> OllamaResult<String> {
        let body = ChatBody {
            model: &self.config.model,
            messages,
            stream: false,
            options: self.sampling(),
        };
        debug!(model = %self.config.model, messages = messages.len(), "Chatting");

        let reply: ChatReply = self.post(CHAT_ROUTE, &body).await?;
        Ok(reply.message.content)
    }

    /// POST with retries on transient failures
    async fn post<B, R>(&self, route: &str, body: &B) -> OllamaResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.post_once(route, body).await {
                Ok(reply) => return Ok(reply),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) if attempt >= attempts => {
                    return Err(if attempts == 1 {
                        e
                    } else {
                        OllamaError::RetriesExhausted {
                            attempts,
                            last_error: e.to_string(),
                        }
                    });
                }
                Err(e) => {
                    let delay = self.retry.delay_before(attempt);
                    warn!(attempt, attempts, delay_ms = delay.as_millis() as u64, error = %e, "Ollama call failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn post_once<B, R>(&self, route: &str, body: &B) -> OllamaResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(self.config.api_url(route))
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = clip(response.text().await.unwrap_or_default());
            if status.as_u16() == 404 && body.contains("not found") {
                return Err(OllamaError::ModelMissing(self.config.model.clone()));
            }
            return Err(OllamaError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn classify(&self, e: reqwest::Error) -> OllamaError {
        if e.is_connect() {
            OllamaError::Unreachable(self.config.base_url.clone())
        } else if e.is_timeout() {
            OllamaError::Timeout(self.config.timeout_secs)
        } else {
            OllamaError::Http(e)
        }
    }
}

fn clip(body: String) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}... (truncated)", &body[..cut]),
        None => body,
    }
}
