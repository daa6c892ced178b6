//! Core types and traits for the search adapter

use crate::error::ResearchError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Title used for the synthetic record returned when a search fails
pub const ERROR_TITLE: &str = "Error";

/// A single web search hit, reduced to the fields the research heuristics read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the web page
    pub title: String,
    /// Text content snippet returned by the provider
    pub content: String,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Synthetic record standing in for a failed search call
    pub fn error(description: impl Into<String>) -> Self {
        Self::new(ERROR_TITLE, description)
    }

    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE
    }
}

/// Tavily search depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDepth::Basic => write!(f, "basic"),
            SearchDepth::Advanced => write!(f, "advanced"),
        }
    }
}

/// Trait that all search provider implementations must satisfy
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync + std::fmt::Debug {
    /// Name of the search provider
    fn name(&self) -> &str;

    /// Run one query against the provider, returning at most `max_results` hits
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, ResearchError>;

    /// Get provider configuration (for debugging/logging)
    fn config(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_record() {
        let record = SearchResult::error("connection refused");
        assert_eq!(record.title, "Error");
        assert_eq!(record.content, "connection refused");
        assert!(record.is_error());
        assert!(!SearchResult::new("Pixel Watch", "").is_error());
    }

    #[test]
    fn test_search_depth_display() {
        assert_eq!(SearchDepth::Basic.to_string(), "basic");
        assert_eq!(SearchDepth::Advanced.to_string(), "advanced");
        assert_eq!(
            serde_json::to_string(&SearchDepth::Advanced).unwrap(),
            "\"advanced\""
        );
    }
}
