use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the service
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(scrapmap::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(scrapmap::config))]
    Config(String),

    #[error("Dataset error: {0}")]
    #[diagnostic(code(scrapmap::dataset))]
    Dataset(String),

    #[error("Server error: {0}")]
    #[diagnostic(code(scrapmap::server))]
    Server(String),

    #[error(transparent)]
    #[diagnostic(code(scrapmap::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(scrapmap::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(scrapmap::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON parsing errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ServiceResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create dataset errors
pub fn dataset_error(message: &str) -> Error {
    Error::Dataset(message.to_string())
}

/// Helper to create server errors
pub fn server_error(message: &str) -> Error {
    Error::Server(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
