//! Balanced pricing: 70% conservative, 30% aggressive

use crate::analysis::MarketAnalysis;
use crate::strategies::{AggressiveStrategy, ConservativeStrategy, PriceAdjustment, PricingRule};

const CONSERVATIVE_WEIGHT: f64 = 0.7;

/// Weighted blend of the conservative and aggressive prices
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedStrategy;

impl PricingRule for BalancedStrategy {
    fn apply(&self, current_price: f64, analysis: &MarketAnalysis) -> PriceAdjustment {
        let conservative = ConservativeStrategy.apply(current_price, analysis).recommended_price;
        let aggressive = AggressiveStrategy.apply(current_price, analysis).recommended_price;
        let recommended_price =
            conservative * CONSERVATIVE_WEIGHT + aggressive * (1.0 - CONSERVATIVE_WEIGHT);

        let change = if current_price != 0.0 {
            (recommended_price - current_price) / current_price * 100.0
        } else {
            0.0
        };

        PriceAdjustment {
            recommended_price,
            reasoning: format!(
                "Balanced strategy: {:.1}% adjustment (70% conservative, 30% aggressive)",
                change
            ),
        }
    }

    fn base_confidence(&self) -> f64 {
        0.7
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Trend;
    use crate::strategies::test_support::analysis;
    use approx::assert_relative_eq;

    #[test]
    fn test_blend_of_prices() {
        // conservative +1.5%, aggressive +3.5%
        let result = BalancedStrategy.apply(100.0, &analysis(Trend::Upward, 0.01, 0.015));
        assert_relative_eq!(result.recommended_price, 102.1, epsilon = 1e-9);
        assert_eq!(
            result.reasoning,
            "Balanced strategy: 2.1% adjustment (70% conservative, 30% aggressive)"
        );
    }
}
