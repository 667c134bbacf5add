//! Error types for the price_forecast crate

use market_data::MarketDataError;
use price_math::MathError;
use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Training was refused or failed (bad input, too little data)
    #[error("Model training error: {0}")]
    TrainingError(String),

    /// A forecast could not be produced (untrained model, bad horizon)
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A cached model could not be written or read back
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON encoding of models and results
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from price data validation
    #[error("Data error: {0}")]
    DataError(#[from] MarketDataError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
