//! # Market Research Agent
//!
//! Researches competitors of a smartwatch through the Tavily web search API.
//! A run discovers up to three competing products, then collects feature,
//! price and review snippets for each one and estimates an average price from
//! the numbers found in the price snippets.
//!
//! The findings are served as a browser page ([`web`]) or printed by the
//! `market-research` binary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use market_research::{
//!     providers::TavilyProvider, MarketResearcher, ResearchConfig, SearchClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = TavilyProvider::new("tvly-YOUR_API_KEY")?;
//!     let researcher = MarketResearcher::new(
//!         SearchClient::new(Box::new(provider)),
//!         ResearchConfig::default(),
//!     );
//!
//!     let report = researcher.research("Nexus Smartwatch Pro 2").await;
//!     for competitor in &report.competitors {
//!         println!("{}: {:?}", competitor.name, competitor.avg_price);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod providers;
pub mod report;
pub mod research;
pub mod types;
pub mod utils;
pub mod web;

// Re-export common types
pub use client::SearchClient;
pub use error::{ResearchError, Result};
pub use report::{CompetitorReport, MarketReport};
pub use research::{MarketResearcher, ResearchConfig};
pub use types::{SearchProvider, SearchResult};
