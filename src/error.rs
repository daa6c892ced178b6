//! Error types for market research operations

use thiserror::Error;

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Errors raised by the search provider, configuration and web layers.
///
/// Search failures never escape [`crate::client::SearchClient::search`]; they
/// are turned into a synthetic result there. The other variants surface at
/// startup or from the server loop.
#[derive(Error, Debug, Clone)]
pub enum ResearchError {
    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    HttpError {
        message: String,
        status_code: Option<u16>,
        response_body: Option<String>,
    },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required credential is not set
    #[error("{0} not found! Please check your .env file.")]
    MissingCredential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parsing error (JSON)
    #[error("Parsing error: {0}")]
    ParseError(String),

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Generic error for unhandled cases
    #[error("{0}")]
    Other(String),
}

impl ResearchError {
    /// HTTP status code carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ResearchError::HttpError { status_code, .. } => *status_code,
            ResearchError::AuthenticationError(_) => Some(401),
            ResearchError::RateLimit(_) => Some(429),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ResearchError {
    fn from(error: reqwest::Error) -> Self {
        ResearchError::HttpError {
            message: error.to_string(),
            status_code: error.status().map(|s| s.as_u16()),
            response_body: None,
        }
    }
}

impl From<serde_json::Error> for ResearchError {
    fn from(error: serde_json::Error) -> Self {
        ResearchError::ParseError(format!("JSON parsing failed: {error}"))
    }
}

impl From<url::ParseError> for ResearchError {
    fn from(error: url::ParseError) -> Self {
        ResearchError::InvalidInput(format!("Invalid URL: {error}"))
    }
}

impl From<std::io::Error> for ResearchError {
    fn from(error: std::io::Error) -> Self {
        ResearchError::Other(format!("IO error: {error}"))
    }
}
