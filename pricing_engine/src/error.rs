//! Error types for the pricing_engine crate

use market_data::MarketDataError;
use price_math::MathError;
use thiserror::Error;

/// Errors raised while analysing markets or recommending prices
#[derive(Debug, Error)]
pub enum PricingEngineError {
    /// No usable price data was supplied
    #[error("No price data: {0}")]
    NoData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown pricing strategy '{0}'. Available strategies: conservative, balanced, aggressive")]
    UnknownStrategy(String),

    /// No price history is stored for the symbol
    #[error("No price history available for {0}")]
    UnknownSymbol(String),

    #[error("Math error: {0}")]
    Math(#[from] MathError),

    #[error("Data error: {0}")]
    Data(#[from] MarketDataError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for pricing operations
pub type Result<T> = std::result::Result<T, PricingEngineError>;
