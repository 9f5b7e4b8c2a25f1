//! Error types for impress-subscriptions

use thiserror::Error;

/// Result type alias for subscription operations
pub type Result<T> = std::result::Result<T, SubscriptionError>;

/// Main error type for subscription operations
#[derive(Error, Debug)]
pub enum SubscriptionError {
    /// Input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backend communication errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Add-form validation errors, checked in declaration order
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Query text is empty after trimming
    #[error("query text required")]
    EmptyQuery,

    /// Alias is empty after trimming
    #[error("alias is required")]
    EmptyAlias,
}

/// Errors raised before a usable HTTP response was obtained
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network failure (connect, timeout, reset)
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// Endpoint URL could not be built from the base URL
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// HTTP client could not be constructed
    #[error("Client error: {message}")]
    Client { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport {
            message: err.to_string(),
        }
    }
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// Config file is not valid TOML or JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base URL does not parse or cannot carry path segments
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
