use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Values parsed but are unusable
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
