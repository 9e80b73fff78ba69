//! Catalog service (TheAudioDB) configuration types

use crate::{env_or, env_parse, ConfigError, ConfigResult};

/// Public base URL of the TheAudioDB v1 JSON API
pub const DEFAULT_AUDIODB_URL: &str = "https://www.theaudiodb.com/api/v1/json";

/// Free test key accepted by TheAudioDB
pub const DEFAULT_AUDIODB_API_KEY: &str = "2";

/// Catalog service configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog API base URL (without the key segment)
    pub url: String,

    /// API key, inserted as a path segment
    pub api_key: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Time-to-live of cached catalog responses in seconds
    pub cache_ttl_secs: u64,
}

impl CatalogConfig {
    /// Load catalog configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let config = Self {
            url: env_or("AUDIODB_URL", DEFAULT_AUDIODB_URL),
            api_key: env_or("AUDIODB_API_KEY", DEFAULT_AUDIODB_API_KEY),
            timeout_secs: env_parse("AUDIODB_TIMEOUT", 10)?,
            cache_ttl_secs: env_parse("CATALOG_CACHE_TTL", 3600)?, // Default: 1 hour
        };

        if config.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "AUDIODB_URL".to_string(),
                "URL cannot be empty".to_string(),
            ));
        }

        if config.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "AUDIODB_API_KEY".to_string(),
                "API key cannot be empty".to_string(),
            ));
        }

        if config.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "AUDIODB_TIMEOUT must be at least 1 second".to_string(),
            ));
        }

        Ok(config)
    }

    /// Create a configuration with a custom URL (useful for testing)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Get the full URL for an endpoint, e.g. `search.php`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url.trim_end_matches('/'),
            self.api_key,
            endpoint.trim_start_matches('/')
        )
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_AUDIODB_URL.to_string(),
            api_key: DEFAULT_AUDIODB_API_KEY.to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 3600,
        }
    }
}
