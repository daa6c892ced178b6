//! HTTP utilities for calling the search API

use crate::error::{ResearchError, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_MS: u64 = 15000;

/// HTTP client wrapper with search-specific functionality
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_MS)
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("market-research/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self { client, timeout_ms })
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// POST a JSON body and return the status code with the raw response text.
    ///
    /// Non-success statuses are returned to the caller rather than mapped, so
    /// providers can attach their own status-specific messages.
    pub async fn post_json_text<B>(&self, url: &str, body: &B) -> Result<(u16, String)>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok((status, text))
    }

    fn map_send_error(&self, error: reqwest::Error) -> ResearchError {
        if error.is_timeout() {
            ResearchError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            ResearchError::HttpError {
                message: format!("Failed to send request: {error}"),
                status_code: None,
                response_body: None,
            }
        }
    }
}

/// Validate that a base URL is an absolute http(s) URL
pub fn validate_base_url(base_url: &str) -> Result<url::Url> {
    let url = url::Url::parse(base_url)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ResearchError::ConfigError(format!(
            "Unsupported URL scheme '{scheme}' in {base_url}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://api.tavily.com/search").is_ok());
        assert!(validate_base_url("http://127.0.0.1:9000").is_ok());

        match validate_base_url("ftp://example.com").unwrap_err() {
            ResearchError::ConfigError(msg) => assert!(msg.contains("ftp")),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
        match validate_base_url("not a url").unwrap_err() {
            ResearchError::InvalidInput(msg) => assert!(msg.contains("Invalid URL")),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_timeout() {
        let client = HttpClient::with_timeout(2500).unwrap();
        assert_eq!(client.timeout_ms(), 2500);
        assert_eq!(HttpClient::new().unwrap().timeout_ms(), DEFAULT_TIMEOUT_MS);
    }
}
