use thiserror::Error;

#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("request to Ollama failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The answer was not the JSON shape we expect
    #[error("unexpected Ollama response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-2xx status with the (clipped) body Ollama sent
    #[error("Ollama returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The configured model has not been pulled
    #[error("model '{0}' is not available, run 'ollama pull {0}'")]
    ModelMissing(String),

    #[error("no answer from Ollama within {0}s")]
    Timeout(u64),

    #[error("cannot reach Ollama at {0}")]
    Unreachable(String),

    #[error("gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl OllamaError {
    /// Failures worth another attempt: the server may come up or finish loading
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Unreachable(_) | Self::Http(_))
    }
}

pub type OllamaResult<T> = Result<T, OllamaError>;
