//! Search client adapter
//!
//! [`SearchClient::search`] never fails: any provider error is logged and
//! replaced by a single synthetic record titled `"Error"` whose content is the
//! error description, so a research run always completes.

use crate::{
    error::ResearchError,
    types::{SearchProvider, SearchResult},
};

/// Wraps a [`SearchProvider`] and absorbs its failures
#[derive(Debug)]
pub struct SearchClient {
    provider: Box<dyn SearchProvider>,
}

impl SearchClient {
    pub fn new(provider: Box<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run `query`, returning at most `max_results` hits or one error record
    pub async fn search(&self, query: &str, max_results: u32) -> Vec<SearchResult> {
        log::debug!(
            "search via {}: {query:?} (max {max_results})",
            self.provider.name()
        );

        match self.provider.search(query, max_results).await {
            Ok(mut results) => {
                results.truncate(max_results as usize);
                log::debug!("received {} results for {query:?}", results.len());
                results
            }
            Err(error) => {
                log::warn!(
                    "search with provider '{}' failed for {query:?}: {error}. Troubleshooting: {}",
                    self.provider.name(),
                    troubleshooting_hint(&error)
                );
                vec![SearchResult::error(error.to_string())]
            }
        }
    }
}

/// Suggestion logged alongside a failed search
fn troubleshooting_hint(error: &ResearchError) -> &'static str {
    match error {
        ResearchError::AuthenticationError(_) => {
            "This is likely an authentication issue. Check your API key and make sure it's valid and has the correct permissions."
        }
        ResearchError::RateLimit(_) => {
            "You've exceeded the rate limit for this API. Try again later or reduce your request frequency."
        }
        ResearchError::Timeout { .. } => {
            "The search provider did not answer in time. Check your network connection or raise the request timeout."
        }
        _ => match error.status_code() {
            Some(401 | 403) => {
                "This is likely an authentication issue. Check your API key and make sure it's valid and has the correct permissions."
            }
            Some(402) => "Your search API plan may be out of credits. Check your account billing.",
            Some(400) => {
                "This is likely due to invalid request parameters. Check your query and other search options."
            }
            Some(429) => {
                "You've exceeded the rate limit for this API. Try again later or reduce your request frequency."
            }
            Some(500..=599) => "The search provider is experiencing server issues. Try again later.",
            _ => "Check your search API credentials and make sure your search request is valid.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    // Mock provider for testing
    #[derive(Debug)]
    struct MockProvider {
        error: Option<ResearchError>,
        results: Vec<SearchResult>,
    }

    impl MockProvider {
        fn with_results(count: usize) -> Self {
            Self {
                error: None,
                results: (1..=count)
                    .map(|i| SearchResult::new(format!("Result {i}"), format!("Content {i}")))
                    .collect(),
            }
        }

        fn with_error(error: ResearchError) -> Self {
            Self {
                error: Some(error),
                results: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl SearchProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn search(
            &self,
            _query: &str,
            _max_results: u32,
        ) -> Result<Vec<SearchResult>, ResearchError> {
            match &self.error {
                Some(error) => Err(error.clone()),
                None => Ok(self.results.clone()),
            }
        }
    }

    #[tokio::test]
    async fn test_search_success() {
        let client = SearchClient::new(Box::new(MockProvider::with_results(2)));
        let results = client.search("smartwatch", 5).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Result 1");
        assert_eq!(results[1].content, "Content 2");
        assert_eq!(client.provider_name(), "mock");
    }

    #[tokio::test]
    async fn test_search_caps_results() {
        let client = SearchClient::new(Box::new(MockProvider::with_results(8)));
        let results = client.search("smartwatch", 5).await;

        assert_eq!(results.len(), 5);
        assert_eq!(results[4].title, "Result 5");
    }

    #[tokio::test]
    async fn test_search_failure_becomes_error_record() {
        let error = ResearchError::HttpError {
            message: "connection refused".to_string(),
            status_code: None,
            response_body: None,
        };
        let expected = error.to_string();
        let client = SearchClient::new(Box::new(MockProvider::with_error(error)));

        let results = client.search("smartwatch", 5).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Error");
        assert_eq!(results[0].content, expected);
    }

    #[test]
    fn test_troubleshooting_hints() {
        let cases = vec![
            (
                ResearchError::HttpError {
                    message: "Unauthorized".to_string(),
                    status_code: Some(401),
                    response_body: None,
                },
                "authentication issue",
            ),
            (
                ResearchError::HttpError {
                    message: "Bad Request".to_string(),
                    status_code: Some(400),
                    response_body: None,
                },
                "invalid request parameters",
            ),
            (
                ResearchError::RateLimit("Too Many Requests".to_string()),
                "rate limit",
            ),
            (
                ResearchError::HttpError {
                    message: "Bad Gateway".to_string(),
                    status_code: Some(502),
                    response_body: None,
                },
                "server issues",
            ),
            (ResearchError::Timeout { timeout_ms: 15000 }, "timeout"),
            (ResearchError::Other("boom".to_string()), "credentials"),
        ];

        for (error, expected) in cases {
            let hint = troubleshooting_hint(&error);
            assert!(
                hint.to_lowercase().contains(expected),
                "Expected '{hint}' to contain '{expected}'"
            );
        }
    }
}
