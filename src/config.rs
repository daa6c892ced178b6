//! Runtime configuration
//!
//! Values come from command-line flags, then the process environment, then a
//! `.env` file loaded by the binary before parsing. The Tavily key is the only
//! required setting; without it startup stops with a visible error.

use crate::{
    client::SearchClient,
    error::{ResearchError, Result},
    providers::tavily::{TavilyProvider, TAVILY_BASE_URL},
    research::{MarketResearcher, ResearchConfig},
    types::SearchDepth,
    utils::http::DEFAULT_TIMEOUT_MS,
};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Tavily API key (starts with "tvly-")
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true, global = true)]
    pub tavily_api_key: Option<String>,

    /// Tavily search endpoint
    #[arg(long, env = "TAVILY_BASE_URL", default_value = TAVILY_BASE_URL, global = true)]
    pub tavily_base_url: String,

    /// Tavily search depth
    #[arg(
        long,
        env = "TAVILY_SEARCH_DEPTH",
        value_enum,
        default_value_t = SearchDepth::Basic,
        global = true
    )]
    pub search_depth: SearchDepth,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "SEARCH_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS, global = true)]
    pub timeout_ms: u64,

    /// Year used in search queries (defaults to the current year)
    #[arg(long, env = "RESEARCH_YEAR", global = true)]
    pub year: Option<i32>,

    /// Market named in price queries
    #[arg(long, env = "RESEARCH_REGION", default_value = "Pakistan", global = true)]
    pub region: String,

    /// Currency named in price queries and shown with prices
    #[arg(long, env = "RESEARCH_CURRENCY", default_value = "PKR", global = true)]
    pub currency: String,
}

impl Settings {
    /// The configured API key, or the startup-fatal missing-credential error
    pub fn api_key(&self) -> Result<&str> {
        match self.tavily_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ResearchError::MissingCredential(
                "Tavily API key".to_string(),
            )),
        }
    }

    pub fn research_config(&self) -> ResearchConfig {
        let mut config = ResearchConfig {
            region: self.region.clone(),
            currency: self.currency.clone(),
            ..Default::default()
        };
        if let Some(year) = self.year {
            config.year = year;
        }
        config
    }

    /// Build the Tavily-backed researcher, validating every setting
    pub fn build_researcher(&self) -> Result<MarketResearcher> {
        if self.timeout_ms == 0 {
            return Err(ResearchError::ConfigError(
                "Search timeout must be greater than zero".to_string(),
            ));
        }

        let provider = TavilyProvider::with_timeout(self.api_key()?, self.timeout_ms)?
            .with_search_depth(self.search_depth)
            .with_base_url(&self.tavily_base_url)?;

        log::info!(
            "search provider configured: {:?}",
            crate::types::SearchProvider::config(&provider)
        );

        Ok(MarketResearcher::new(
            SearchClient::new(Box::new(provider)),
            self.research_config(),
        ))
    }
}
