//! Shared configuration types for Cadence crates
//!
//! Everything is read from environment variables, optionally seeded from a
//! `.env` file. Unset variables fall back to defaults that work against the
//! public catalog and a local Ollama; set-but-invalid values are errors.

mod catalog;
mod error;
mod ollama;

pub use catalog::{CatalogConfig, DEFAULT_AUDIODB_API_KEY, DEFAULT_AUDIODB_URL};
pub use error::{ConfigError, ConfigResult};
pub use ollama::{OllamaConfig, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Configuration shared by every Cadence binary
#[derive(Debug, Clone)]
pub struct CommonConfig {
    pub catalog: CatalogConfig,
    pub ollama: OllamaConfig,
    pub environment: Environment,
    /// Level or filter directive from `RUST_LOG`, else `LOG_LEVEL`
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    /// Unknown names map to development
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "staging" | "stage" => Self::Staging,
            _ => Self::Development,
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CommonConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            catalog: CatalogConfig::from_env()?,
            ollama: OllamaConfig::from_env()?,
            environment: env_or("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env::var("RUST_LOG")
                .or_else(|_| env::var("LOG_LEVEL"))
                .unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Load a `.env` file if present, then read the environment
    pub fn load() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Tracing filter directive for a binary.
    ///
    /// A bare level such as `debug` is scoped to `target`; anything that
    /// already names targets is used as given.
    pub fn log_filter(&self, target: &str) -> String {
        let level = self.log_level.trim();
        if level.contains('=') || level.contains(',') {
            level.to_string()
        } else {
            format!("{target}={level}")
        }
    }
}

/// Value of `name`, or `default` when unset
pub fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse `name` into `T`, or `default` when unset
pub fn env_parse<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
