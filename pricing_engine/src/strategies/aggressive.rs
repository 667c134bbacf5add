//! Aggressive pricing: amplified trend plus volatility, capped at 5%

use crate::analysis::{MarketAnalysis, Trend};
use crate::strategies::{PriceAdjustment, PricingRule};

const MAX_ADJUSTMENT: f64 = 0.05;

/// Trend strength is doubled and volatility added on top
#[derive(Debug, Clone, Copy, Default)]
pub struct AggressiveStrategy;

impl AggressiveStrategy {
    /// Relative adjustment for the analysis
    pub fn adjustment(analysis: &MarketAnalysis) -> f64 {
        let base = analysis.trend_strength * 2.0;
        let step = MAX_ADJUSTMENT.min(base + analysis.volatility);
        match analysis.trend {
            Trend::Upward => step,
            Trend::Downward => -step,
            // small markup even without a trend
            Trend::Sideways => analysis.volatility * 0.5,
        }
    }
}

impl PricingRule for AggressiveStrategy {
    fn apply(&self, current_price: f64, analysis: &MarketAnalysis) -> PriceAdjustment {
        let adjustment = Self::adjustment(analysis);

        PriceAdjustment {
            recommended_price: current_price * (1.0 + adjustment),
            reasoning: format!(
                "Aggressive strategy: {:.1}% adjustment based on {} trend and volatility",
                adjustment * 100.0,
                analysis.trend
            ),
        }
    }

    fn base_confidence(&self) -> f64 {
        0.6
    }
}
