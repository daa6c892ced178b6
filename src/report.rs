//! Research report structures and their exports

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name offered for the plain-text download
pub const TEXT_EXPORT_FILENAME: &str = "market_research_report.txt";

/// Findings for one competitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorReport {
    pub name: String,
    pub features: Vec<String>,
    pub price: Vec<String>,
    pub reviews: Vec<String>,
    /// Integer mean of prices parsed from the price snippets
    pub avg_price: Option<u64>,
}

impl CompetitorReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
            price: Vec::new(),
            reviews: Vec::new(),
            avg_price: None,
        }
    }
}

/// Result of one research run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketReport {
    pub product: String,
    pub currency: String,
    pub generated_at: DateTime<Utc>,
    pub competitors: Vec<CompetitorReport>,
}

impl MarketReport {
    pub fn new(product: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            currency: currency.into(),
            generated_at: Utc::now(),
            competitors: Vec::new(),
        }
    }

    /// Competitor name to average price, for competitors with a resolved average.
    ///
    /// Names are unique keys: a repeated name keeps its first position and
    /// takes the later average.
    pub fn price_chart(&self) -> Vec<(&str, u64)> {
        let mut chart: Vec<(&str, u64)> = Vec::new();
        for competitor in &self.competitors {
            let Some(avg) = competitor.avg_price else {
                continue;
            };
            match chart.iter_mut().find(|entry| entry.0 == competitor.name) {
                Some(entry) => entry.1 = avg,
                None => chart.push((competitor.name.as_str(), avg)),
            }
        }
        chart
    }

    /// Literal textual representation of the report structure
    pub fn to_text(&self) -> String {
        format!("{self:#?}")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One wedge of the sentiment pie chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentSlice {
    pub label: &'static str,
    pub percent: u32,
    pub color: &'static str,
}

/// Illustrative sentiment split shown with every report.
///
/// Not derived from the fetched reviews.
pub const EXAMPLE_SENTIMENT: [SentimentSlice; 3] = [
    SentimentSlice {
        label: "Positive",
        percent: 60,
        color: "#4CAF50",
    },
    SentimentSlice {
        label: "Neutral",
        percent: 25,
        color: "#FFC107",
    },
    SentimentSlice {
        label: "Negative",
        percent: 15,
        color: "#F44336",
    },
];
