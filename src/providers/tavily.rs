//! Tavily Search API provider
//!
//! Tavily is an AI-powered search API optimized for LLM agents and applications.
//! Each query is one JSON POST; only the title and content of each hit are kept.

use crate::{
    error::{ResearchError, Result},
    types::{SearchDepth, SearchProvider, SearchResult},
    utils::http::{validate_base_url, HttpClient, DEFAULT_TIMEOUT_MS},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default Tavily search endpoint
pub const TAVILY_BASE_URL: &str = "https://api.tavily.com/search";

/// Upper bound Tavily accepts for `max_results`
const TAVILY_MAX_RESULTS: u32 = 50;

/// Tavily search result structure; extra fields are ignored
#[derive(Debug, Deserialize)]
struct TavilySearchResult {
    title: String,
    #[serde(default)]
    content: String,
}

/// Tavily API response structure
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<TavilySearchResult>,
}

/// Tavily search request structure
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    include_answer: bool,
    include_images: bool,
    include_raw_content: bool,
    max_results: u32,
}

/// Tavily Search API provider
#[derive(Debug, Clone)]
pub struct TavilyProvider {
    api_key: String,
    base_url: String,
    search_depth: SearchDepth,
    include_raw_content: bool,
    http: HttpClient,
}

impl TavilyProvider {
    /// Create a new Tavily provider with the given API key
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT_MS)
    }

    /// Create a new Tavily provider whose requests time out after `timeout_ms`
    pub fn with_timeout(api_key: &str, timeout_ms: u64) -> Result<Self> {
        if api_key.is_empty() {
            return Err(ResearchError::ConfigError(
                "Tavily API key is required".to_string(),
            ));
        }

        // The service is the authority on keys; a bad one fails per search call
        if !api_key.starts_with("tvly-") {
            log::warn!("Tavily API key does not start with 'tvly-'; searches may be rejected");
        }

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: TAVILY_BASE_URL.to_string(),
            search_depth: SearchDepth::Basic,
            include_raw_content: false,
            http: HttpClient::with_timeout(timeout_ms)?,
        })
    }

    /// Set search depth; advanced depth also requests raw page content
    pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self.include_raw_content = depth == SearchDepth::Advanced;
        self
    }

    /// Set custom base URL (for testing or enterprise endpoints)
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        validate_base_url(base_url)?;
        self.base_url = base_url.to_string();
        Ok(self)
    }
}

/// Status-specific explanation for a failed Tavily call
fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request - check your query parameters",
        401 => "Unauthorized - check your API key",
        402 => "Payment required - check your Tavily account billing",
        403 => "Forbidden - API key may be invalid or suspended",
        429 => "Rate limit exceeded - too many requests",
        500..=599 => "Tavily server error - try again later",
        _ => "Unknown error occurred",
    }
}

#[async_trait::async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(ResearchError::InvalidInput(
                "Query cannot be empty".to_string(),
            ));
        }

        let request_body = TavilyRequest {
            api_key: &self.api_key,
            query,
            search_depth: self.search_depth,
            include_answer: false,
            include_images: false,
            include_raw_content: self.include_raw_content,
            max_results: max_results.min(TAVILY_MAX_RESULTS),
        };

        log::debug!("tavily request: query={query:?} max_results={max_results}");
        let (status, response_text) = self
            .http
            .post_json_text(&self.base_url, &request_body)
            .await?;

        if !(200..300).contains(&status) {
            let message = format!("Tavily API error ({status}): {}", status_message(status));
            return Err(match status {
                401 | 403 => ResearchError::AuthenticationError(message),
                429 => ResearchError::RateLimit(message),
                _ => ResearchError::HttpError {
                    message,
                    status_code: Some(status),
                    response_body: Some(response_text),
                },
            });
        }

        let tavily_response: TavilyResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                ResearchError::ParseError(format!("Failed to parse Tavily response: {e}"))
            })?;

        log::debug!(
            "tavily response: {} results for {query:?}",
            tavily_response.results.len()
        );

        Ok(tavily_response
            .results
            .into_iter()
            .take(max_results as usize)
            .map(|result| SearchResult::new(result.title, result.content))
            .collect())
    }

    fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert("provider".to_string(), "tavily".to_string());
        config.insert("api_key".to_string(), "***".to_string());
        config.insert("base_url".to_string(), self.base_url.clone());
        config.insert("search_depth".to_string(), self.search_depth.to_string());
        config.insert("timeout_ms".to_string(), self.http.timeout_ms().to_string());
        config
    }
}
