//! Pricing strategies mapping a current price and market analysis to a
//! recommended price
//!
//! - Conservative: small moves that follow the trend, capped at 2%
//! - Aggressive: trend strength amplified plus volatility, capped at 5%
//! - Balanced: a 70/30 blend of the two

pub mod aggressive;
pub mod balanced;
pub mod conservative;

pub use aggressive::AggressiveStrategy;
pub use balanced::BalancedStrategy;
pub use conservative::ConservativeStrategy;

use crate::analysis::MarketAnalysis;
use crate::error::PricingEngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A strategy's price and the explanation behind it
#[derive(Debug, Clone, PartialEq)]
pub struct PriceAdjustment {
    pub recommended_price: f64,
    pub reasoning: String,
}

/// Trait implemented by every pricing strategy
pub trait PricingRule {
    /// Recommend a price for `current_price` under the given conditions
    fn apply(&self, current_price: f64, analysis: &MarketAnalysis) -> PriceAdjustment;

    /// Confidence before the data-sufficiency discount
    fn base_confidence(&self) -> f64;
}

/// The named strategies callers choose from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingStrategy {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl PricingStrategy {
    pub const ALL: [PricingStrategy; 3] = [
        PricingStrategy::Conservative,
        PricingStrategy::Balanced,
        PricingStrategy::Aggressive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingStrategy::Conservative => "conservative",
            PricingStrategy::Balanced => "balanced",
            PricingStrategy::Aggressive => "aggressive",
        }
    }

    fn rule(&self) -> &'static dyn PricingRule {
        match self {
            PricingStrategy::Conservative => &ConservativeStrategy,
            PricingStrategy::Balanced => &BalancedStrategy,
            PricingStrategy::Aggressive => &AggressiveStrategy,
        }
    }
}

impl PricingRule for PricingStrategy {
    fn apply(&self, current_price: f64, analysis: &MarketAnalysis) -> PriceAdjustment {
        self.rule().apply(current_price, analysis)
    }

    fn base_confidence(&self) -> f64 {
        self.rule().base_confidence()
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingStrategy {
    type Err = PricingEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == wanted)
            .ok_or_else(|| PricingEngineError::UnknownStrategy(s.to_string()))
    }
}
