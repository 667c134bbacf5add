//! Conservative pricing: follow the trend by at most 2%

use crate::analysis::{MarketAnalysis, Trend};
use crate::strategies::{PriceAdjustment, PricingRule};

/// Largest move the conservative strategy makes
const MAX_ADJUSTMENT: f64 = 0.02;

/// Moves the price with the trend by the volatility, capped at 2%
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativeStrategy;

impl ConservativeStrategy {
    /// Relative adjustment for the analysis
    pub fn adjustment(analysis: &MarketAnalysis) -> f64 {
        let step = MAX_ADJUSTMENT.min(analysis.volatility);
        match analysis.trend {
            Trend::Upward => step,
            Trend::Downward => -step,
            Trend::Sideways => 0.0,
        }
    }
}

impl PricingRule for ConservativeStrategy {
    fn apply(&self, current_price: f64, analysis: &MarketAnalysis) -> PriceAdjustment {
        let adjustment = Self::adjustment(analysis);

        PriceAdjustment {
            recommended_price: current_price * (1.0 + adjustment),
            reasoning: format!(
                "Conservative strategy: {:.1}% adjustment based on {} trend",
                adjustment * 100.0,
                analysis.trend
            ),
        }
    }

    fn base_confidence(&self) -> f64 {
        0.8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::analysis;
    use approx::assert_relative_eq;

    #[test]
    fn test_sideways_keeps_price() {
        let result = ConservativeStrategy.apply(100.0, &analysis(Trend::Sideways, 0.0, 0.05));
        assert_eq!(result.recommended_price, 100.0);
        assert_eq!(
            result.reasoning,
            "Conservative strategy: 0.0% adjustment based on sideways trend"
        );
    }

    #[test]
    fn test_adjustment_capped_at_two_percent() {
        let up = ConservativeStrategy.apply(100.0, &analysis(Trend::Upward, 0.1, 0.5));
        assert_relative_eq!(up.recommended_price, 102.0, epsilon = 1e-9);

        let down = ConservativeStrategy.apply(100.0, &analysis(Trend::Downward, 0.1, 0.01));
        assert_relative_eq!(down.recommended_price, 99.0, epsilon = 1e-9);
        assert!(down.reasoning.contains("-1.0%"));
    }
}
