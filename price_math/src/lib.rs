//! # Price Math
//!
//! Statistics helpers shared by the forecasting and pricing crates.
//! Everything here works on plain `f64` slices so callers decide how a
//! price history is stored.

use thiserror::Error;

pub mod correlation;
pub mod regression;
pub mod returns;
pub mod scaling;
pub mod statistics;

pub use correlation::pearson;
pub use regression::{fit_line, TrendLine};
pub use returns::{paired_returns, simple_returns};
pub use scaling::StandardScaler;
pub use statistics::{mean, min_max, population_std_dev, tail};

/// Errors that can occur in price statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for price statistics
pub type Result<T> = std::result::Result<T, MathError>;
