//! Error types for the explorer
//!
//! Catalog transport failures never reach this type; the catalog client
//! recovers them into empty results. What remains are the outcomes the user
//! has to act on and start-up failures.

use cadence_audiodb_client::AudioDbError;
use cadence_ollama_client::OllamaError;
use cadence_shared_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The catalog search returned no artist for the name
    #[error("artist '{0}' not found")]
    NotFound(String),

    /// The request was rejected before any catalog call
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The catalog HTTP client could not be built
    #[error("catalog client error: {0}")]
    Client(#[from] AudioDbError),

    /// The generative-text client could not be built
    #[error("assistant client error: {0}")]
    Assistant(#[from] OllamaError),
}

impl ExplorerError {
    /// Errors caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }

    /// Text for the rendering sink
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => {
                "No artist found. Please check the spelling or try another artist.".to_string()
            }
            Self::Validation(reason) => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Log at a level matching the cause
    pub fn log(&self) {
        if self.is_user_error() {
            tracing::info!(error = %self, "Request rejected");
        } else {
            tracing::error!(error = %self, "Explorer error");
        }
    }
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;
