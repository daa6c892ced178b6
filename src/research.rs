//! Research orchestrator
//!
//! One run issues a discovery query, then three queries per discovered
//! competitor, strictly one after another.

use crate::{
    client::SearchClient,
    heuristics::{average_price, extract_price, format_snippet, normalize},
    report::{CompetitorReport, MarketReport},
    types::SearchResult,
};
use chrono::Datelike;

/// Query templates and limits for a research run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchConfig {
    /// Year appended to every query
    pub year: i32,
    /// Market named in the price query
    pub region: String,
    /// Currency named in the price query and shown with prices
    pub currency: String,
    pub max_competitors: usize,
    pub results_per_query: u32,
    pub snippet_chars: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            year: chrono::Local::now().year(),
            region: "Pakistan".to_string(),
            currency: "PKR".to_string(),
            max_competitors: 3,
            results_per_query: 5,
            snippet_chars: 120,
        }
    }
}

impl ResearchConfig {
    pub fn discovery_query(&self, product: &str) -> String {
        format!("Top smartwatches competing with {product} in {}", self.year)
    }

    pub fn features_query(&self, competitor: &str) -> String {
        format!("{competitor} smartwatch features {}", self.year)
    }

    pub fn price_query(&self, competitor: &str) -> String {
        format!(
            "{competitor} smartwatch price in {} {} {}",
            self.region, self.year, self.currency
        )
    }

    pub fn reviews_query(&self, competitor: &str) -> String {
        format!("{competitor} smartwatch customer reviews {}", self.year)
    }
}

/// Runs the fixed query sequence and assembles a [`MarketReport`]
#[derive(Debug)]
pub struct MarketResearcher {
    client: SearchClient,
    config: ResearchConfig,
}

impl MarketResearcher {
    pub fn new(client: SearchClient, config: ResearchConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Research competitors of `product_name`
    pub async fn research(&self, product_name: &str) -> MarketReport {
        let mut report = MarketReport::new(product_name, &self.config.currency);

        let discovered = self
            .client
            .search(
                &self.config.discovery_query(product_name),
                self.config.results_per_query,
            )
            .await;

        if discovered.iter().any(SearchResult::is_error) {
            log::warn!(
                "competitor discovery for {product_name:?} failed; continuing with the error record"
            );
        }

        let competitors: Vec<String> = discovered
            .iter()
            .take(self.config.max_competitors)
            .map(|hit| normalize(&hit.title))
            .collect();

        log::info!(
            "researching {} competitors of {product_name:?}: {competitors:?}",
            competitors.len()
        );

        for name in competitors {
            let competitor = self.research_competitor(name).await;
            report.competitors.push(competitor);
        }

        report
    }

    async fn research_competitor(&self, name: String) -> CompetitorReport {
        let limit = self.config.results_per_query;
        let mut competitor = CompetitorReport::new(name);

        let features = self
            .client
            .search(&self.config.features_query(&competitor.name), limit)
            .await;
        competitor.features = self.snippets(&features);

        let prices = self
            .client
            .search(&self.config.price_query(&competitor.name), limit)
            .await;
        competitor.price = self.snippets(&prices);
        competitor.avg_price =
            average_price(prices.iter().filter_map(|hit| extract_price(&hit.content)));

        let reviews = self
            .client
            .search(&self.config.reviews_query(&competitor.name), limit)
            .await;
        competitor.reviews = self.snippets(&reviews);

        log::debug!(
            "{}: {} features, {} prices, {} reviews, avg price {:?}",
            competitor.name,
            competitor.features.len(),
            competitor.price.len(),
            competitor.reviews.len(),
            competitor.avg_price
        );

        competitor
    }

    fn snippets(&self, hits: &[SearchResult]) -> Vec<String> {
        hits.iter()
            .map(|hit| format_snippet(&hit.title, &hit.content, self.config.snippet_chars))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ResearchError, types::SearchProvider};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Answers each query by keyword and records every query it receives
    #[derive(Debug, Default)]
    struct ScriptedProvider {
        queries: Mutex<Vec<String>>,
        fail_prices: bool,
    }

    #[async_trait]
    impl SearchProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn search(
            &self,
            query: &str,
            _max_results: u32,
        ) -> Result<Vec<SearchResult>, ResearchError> {
            self.queries.lock().unwrap().push(query.to_string());

            if query.starts_with("Top smartwatches") {
                return Ok(vec![
                    SearchResult::new("Apple Watch - 2025 Review", ""),
                    SearchResult::new("Galaxy Watch | Samsung", ""),
                    SearchResult::new("Pixel Watch", ""),
                    SearchResult::new("Fitbit Sense: specs", ""),
                ]);
            }

            if query.contains(" price in ") {
                if self.fail_prices {
                    return Err(ResearchError::Other("quota exhausted".to_string()));
                }
                return Ok(vec![
                    SearchResult::new("Shop A", "Now Rs 1,000 only"),
                    SearchResult::new("Shop B", "Price 2,000"),
                    SearchResult::new("Shop C", "Deal: 3000"),
                    SearchResult::new("Shop D", "Call for price"),
                ]);
            }

            Ok((1..=7)
                .map(|i| SearchResult::new(format!("Hit {i}"), "x".repeat(200)))
                .collect())
        }
    }

    /// Lets a test keep a handle on the provider after handing it to the client
    #[derive(Debug)]
    struct Shared(Arc<ScriptedProvider>);

    #[async_trait]
    impl SearchProvider for Shared {
        fn name(&self) -> &str {
            self.0.name()
        }

        async fn search(
            &self,
            query: &str,
            max_results: u32,
        ) -> Result<Vec<SearchResult>, ResearchError> {
            self.0.search(query, max_results).await
        }
    }

    fn test_config() -> ResearchConfig {
        ResearchConfig {
            year: 2025,
            ..Default::default()
        }
    }

    #[test]
    fn test_query_templates() {
        let config = test_config();

        assert_eq!(
            config.discovery_query("Nexus Pro"),
            "Top smartwatches competing with Nexus Pro in 2025"
        );
        assert_eq!(
            config.features_query("Pixel Watch"),
            "Pixel Watch smartwatch features 2025"
        );
        assert_eq!(
            config.price_query("Pixel Watch"),
            "Pixel Watch smartwatch price in Pakistan 2025 PKR"
        );
        assert_eq!(
            config.reviews_query("Pixel Watch"),
            "Pixel Watch smartwatch customer reviews 2025"
        );
    }

    #[tokio::test]
    async fn test_research_builds_report() {
        let researcher = MarketResearcher::new(
            SearchClient::new(Box::new(ScriptedProvider::default())),
            test_config(),
        );

        let report = researcher.research("Nexus Pro").await;

        assert_eq!(report.product, "Nexus Pro");
        assert_eq!(report.currency, "PKR");
        let names: Vec<&str> = report.competitors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Apple Watch", "Galaxy Watch", "Pixel Watch"]);

        for competitor in &report.competitors {
            assert_eq!(competitor.features.len(), 5);
            assert_eq!(competitor.reviews.len(), 5);
            assert_eq!(competitor.price.len(), 4);
            assert_eq!(competitor.avg_price, Some(2000));
            assert_eq!(competitor.features[0], format!("Hit 1: {}", "x".repeat(120)));
            assert_eq!(competitor.price[0], "Shop A: Now Rs 1,000 only");
        }
    }

    #[tokio::test]
    async fn test_research_query_order() {
        let provider = Arc::new(ScriptedProvider::default());
        let researcher = MarketResearcher::new(
            SearchClient::new(Box::new(Shared(provider.clone()))),
            test_config(),
        );
        researcher.research("Nexus Pro").await;

        let queries = provider.queries.lock().unwrap().clone();
        assert_eq!(queries.len(), 10);
        assert_eq!(queries[0], "Top smartwatches competing with Nexus Pro in 2025");
        assert_eq!(queries[1], "Apple Watch smartwatch features 2025");
        assert_eq!(queries[2], "Apple Watch smartwatch price in Pakistan 2025 PKR");
        assert_eq!(queries[3], "Apple Watch smartwatch customer reviews 2025");
        assert_eq!(queries[9], "Pixel Watch smartwatch customer reviews 2025");
    }

    #[tokio::test]
    async fn test_failed_price_search_degrades() {
        let provider = ScriptedProvider {
            fail_prices: true,
            ..Default::default()
        };
        let researcher =
            MarketResearcher::new(SearchClient::new(Box::new(provider)), test_config());

        let report = researcher.research("Nexus Pro").await;

        assert_eq!(report.competitors.len(), 3);
        for competitor in &report.competitors {
            assert_eq!(competitor.price, vec!["Error: quota exhausted".to_string()]);
            assert_eq!(competitor.avg_price, None);
        }
        assert!(report.price_chart().is_empty());
    }
}
