//! Recommendation, report and insight records

use crate::analysis::MarketAnalysis;
use crate::error::Result;
use crate::strategies::PricingStrategy;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Recommended price for one symbol under one strategy
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRecommendation {
    pub symbol: String,
    pub strategy: PricingStrategy,
    pub current_price: f64,
    pub recommended_price: f64,
    /// In `[0, 1]`, discounted for short histories
    pub confidence_score: f64,
    /// The analysis the price was derived from, after any forecast override
    pub market_conditions: MarketAnalysis,
    pub reasoning: String,
    pub timestamp: DateTime<Utc>,
}

impl PricingRecommendation {
    /// Relative change from the current price, in percent
    pub fn price_change_percentage(&self) -> f64 {
        if self.current_price == 0.0 {
            return 0.0;
        }
        (self.recommended_price - self.current_price) / self.current_price * 100.0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for PricingRecommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PricingRecommendation", 9)?;
        state.serialize_field("symbol", &self.symbol)?;
        state.serialize_field("strategy", &self.strategy)?;
        state.serialize_field("current_price", &self.current_price)?;
        state.serialize_field("recommended_price", &self.recommended_price)?;
        state.serialize_field("confidence_score", &self.confidence_score)?;
        state.serialize_field("market_conditions", &self.market_conditions)?;
        state.serialize_field("reasoning", &self.reasoning)?;
        state.serialize_field("price_change_percentage", &self.price_change_percentage())?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.end()
    }
}

/// Aggregates over the recommendations of a report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub average_confidence: f64,
    pub average_price_change: f64,
    pub total_recommendations: usize,
}

impl SummaryStatistics {
    pub fn from_recommendations(recommendations: &[PricingRecommendation]) -> Self {
        if recommendations.is_empty() {
            return Self::default();
        }

        let n = recommendations.len() as f64;
        Self {
            average_confidence: recommendations.iter().map(|r| r.confidence_score).sum::<f64>() / n,
            average_price_change: recommendations
                .iter()
                .map(PricingRecommendation::price_change_percentage)
                .sum::<f64>()
                / n,
            total_recommendations: recommendations.len(),
        }
    }
}

/// Recommendations for several symbols under one strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingReport {
    pub report_timestamp: DateTime<Utc>,
    pub strategy_type: PricingStrategy,
    pub symbols_analyzed: usize,
    pub recommendations: Vec<PricingRecommendation>,
    pub summary_statistics: SummaryStatistics,
    pub summary: String,
}

impl PricingReport {
    /// Report with nothing in it, used when there are no symbols at all
    pub fn empty(strategy_type: PricingStrategy) -> Self {
        Self {
            report_timestamp: Utc::now(),
            strategy_type,
            symbols_analyzed: 0,
            recommendations: Vec::new(),
            summary_statistics: SummaryStatistics::default(),
            summary: "No symbols available for analysis".to_string(),
        }
    }

    pub fn new(strategy_type: PricingStrategy, recommendations: Vec<PricingRecommendation>) -> Self {
        let summary_statistics = SummaryStatistics::from_recommendations(&recommendations);
        let summary = if recommendations.is_empty() {
            "No valid recommendations generated".to_string()
        } else {
            format!(
                "Analyzed {} symbols with average confidence {:.2} and average price change {:.2}%",
                recommendations.len(),
                summary_statistics.average_confidence,
                summary_statistics.average_price_change
            )
        };

        Self {
            report_timestamp: Utc::now(),
            strategy_type,
            symbols_analyzed: recommendations.len(),
            recommendations,
            summary_statistics,
            summary,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One recommendation per strategy for the same symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRecommendations {
    pub conservative: PricingRecommendation,
    pub balanced: PricingRecommendation,
    pub aggressive: PricingRecommendation,
}

/// Full picture for a single symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingInsights {
    pub symbol: String,
    pub current_price: f64,
    pub market_analysis: MarketAnalysis,
    pub recommendations: StrategyRecommendations,
    pub insights_timestamp: DateTime<Utc>,
}
