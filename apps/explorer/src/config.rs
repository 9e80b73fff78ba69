//! Explorer configuration loaded from environment variables

use std::time::Duration;

use cadence_shared_config::{CatalogConfig, CommonConfig, Environment, OllamaConfig};

use crate::error::ExplorerResult;

/// Explorer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other binaries
    pub common: CommonConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> ExplorerResult<Self> {
        Ok(Self {
            common: CommonConfig::from_env()?,
        })
    }

    /// Load a `.env` file if present, then read the environment
    pub fn load() -> ExplorerResult<Self> {
        Ok(Self {
            common: CommonConfig::load()?,
        })
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.common.catalog
    }

    pub fn ollama(&self) -> &OllamaConfig {
        &self.common.ollama
    }

    /// Lifetime of a cached catalog response
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.common.catalog.cache_ttl_secs)
    }

    pub fn environment(&self) -> Environment {
        self.common.environment
    }
}
