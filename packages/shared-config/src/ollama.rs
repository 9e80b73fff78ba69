//! Settings for the generative-text service behind the assistant

use crate::{env_or, env_parse, ConfigError, ConfigResult};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral";

/// Where the recommender and chat send their prompts, and how to sample
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Upper bound on generated tokens per answer
    pub max_tokens: u32,
    /// Sampling temperature, accepted in `0.0..=2.0`
    pub temperature: f32,
}

impl OllamaConfig {
    /// Read `OLLAMA_*` variables, falling back to a local server running mistral
    pub fn from_env() -> ConfigResult<Self> {
        let config = Self {
            base_url: env_or("OLLAMA_URL", DEFAULT_OLLAMA_URL),
            model: env_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            timeout_secs: env_parse("OLLAMA_TIMEOUT", 60)?,
            max_tokens: env_parse("OLLAMA_MAX_TOKENS", 2048)?,
            temperature: env_parse("OLLAMA_TEMPERATURE", 0.7)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "OLLAMA_MODEL cannot be empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "OLLAMA_TEMPERATURE must be within 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Absolute URL of an API route such as `api/chat`
    pub fn api_url(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout_secs: 60,
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}
