//! # Pricing Engine
//!
//! Turns daily price histories into market statistics and price
//! recommendations.
//!
//! ## Strategy Categories
//!
//! - **Conservative**: follows the trend by at most 2%
//! - **Aggressive**: amplifies the trend, up to 5%
//! - **Balanced**: 70% conservative, 30% aggressive
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use market_data::PriceSeries;
//! use pricing_engine::{PricingEngine, PricingStrategy};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
//! let series = PriceSeries::from_closes("GLD", start, &closes).unwrap();
//!
//! let mut engine = PricingEngine::new();
//! let analysis = engine.analyze_market_conditions(&series).unwrap();
//! println!("{} market, {} trend", analysis.market_condition, analysis.trend);
//!
//! let rec = engine
//!     .recommend_pricing(139.0, None, PricingStrategy::Conservative, "GLD")
//!     .unwrap();
//! assert!(rec.recommended_price > 139.0);
//! ```

pub mod analysis;
pub mod engine;
pub mod error;
pub mod recommendation;
pub mod strategies;

pub use analysis::{
    analyze_market_condition, calculate_volatility, detect_trend, momentum, support_resistance,
    MarketAnalysis, MarketCondition, Trend,
};
pub use engine::PricingEngine;
pub use error::{PricingEngineError, Result};
pub use recommendation::{
    PricingInsights, PricingRecommendation, PricingReport, StrategyRecommendations,
    SummaryStatistics,
};
pub use strategies::{PriceAdjustment, PricingRule, PricingStrategy};
