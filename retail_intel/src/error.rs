//! Application-level errors

use market_data::MarketDataError;
use price_forecast::ForecastError;
use pricing_engine::PricingEngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingEngineError),

    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
