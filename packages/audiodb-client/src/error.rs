//! Catalog client error types

use thiserror::Error;

/// TheAudioDB client errors
///
/// These never cross the soft-failure operations of [`crate::AudioDbClient`];
/// they are only visible through the `try_*` variants.
#[derive(Error, Debug)]
pub enum AudioDbError {
    /// Invalid input provided to an API method (blank or oversized name/id)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Request to TheAudioDB timed out after {0} seconds")]
    Timeout(u64),

    /// Catalog answered with a non-success status
    #[error("TheAudioDB returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed
    #[error("Failed to parse TheAudioDB response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AudioDbError {
    /// Whether the failure came from the caller's input rather than the catalog
    pub fn is_input_error(&self) -> bool {
        matches!(self, AudioDbError::InvalidInput(_))
    }
}

/// Result type for catalog operations
pub type AudioDbResult<T> = Result<T, AudioDbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(AudioDbError::InvalidInput("empty".to_string()).is_input_error());
        assert!(!AudioDbError::Timeout(10).is_input_error());
        assert!(!AudioDbError::Status {
            status: 503,
            body: String::new()
        }
        .is_input_error());
    }

    #[test]
    fn test_error_display() {
        let err = AudioDbError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "TheAudioDB returned status 404: Not Found");
        assert_eq!(
            AudioDbError::Timeout(10).to_string(),
            "Request to TheAudioDB timed out after 10 seconds"
        );
    }
}
