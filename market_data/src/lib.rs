//! # Market Data
//!
//! Daily OHLCV (Open, High, Low, Close, Volume) price histories for gold,
//! silver and ETF symbols, plus the keyed store the forecasting and pricing
//! engines read from.
//!
//! ## Usage Example
//!
//! ```
//! use market_data::{PriceSeries, PriceStore};
//! use market_data::utils::generate_test_data;
//!
//! let records = generate_test_data(60, 1900.0, 0.02);
//! let series = PriceSeries::new("GOLD", records).unwrap();
//!
//! let mut store = PriceStore::new();
//! store.insert(series);
//! assert_eq!(store.symbols(), vec!["GOLD".to_string()]);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod series;
mod store;
pub mod utils;

pub use series::PriceSeries;
pub use store::PriceStore;

/// Errors raised while building or looking up price histories
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    #[error("Invalid record on {date}: {reason}")]
    InvalidRecord { date: NaiveDate, reason: String },

    #[error("Records out of chronological order: {previous} is not before {next}")]
    OutOfOrder { previous: NaiveDate, next: NaiveDate },

    #[error("Price series for {0} is empty")]
    EmptySeries(String),

    #[error("No price history for symbol {0}")]
    UnknownSymbol(String),
}

/// Result type for market data operations
pub type Result<T> = std::result::Result<T, MarketDataError>;

/// Represents OHLCV (Open, High, Low, Close, Volume) data for a specific time period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvData {
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Volume
    pub volume: u64,
}

impl OhlcvData {
    /// Check the bar invariants: every price strictly positive and finite,
    /// and `low <= open, close <= high`.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} price must be positive, got {}", name, value));
            }
        }

        if self.low > self.open.min(self.close) {
            return Err(format!(
                "low {} is above open/close ({}, {})",
                self.low, self.open, self.close
            ));
        }
        if self.high < self.open.max(self.close) {
            return Err(format!(
                "high {} is below open/close ({}, {})",
                self.high, self.open, self.close
            ));
        }

        Ok(())
    }
}

/// Daily OHLCV data with a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOhlcv {
    /// Date of the data point
    pub date: NaiveDate,
    /// OHLCV data
    pub data: OhlcvData,
}

impl DailyOhlcv {
    /// A bar that opened, traded and closed at one price
    pub fn flat(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            data: OhlcvData {
                open: price,
                high: price,
                low: price,
                close: price,
                volume: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> OhlcvData {
        OhlcvData {
            open,
            high,
            low,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn test_valid_bar() {
        assert!(bar(100.0, 105.0, 99.0, 102.0).validate().is_ok());
        assert!(bar(100.0, 100.0, 100.0, 100.0).validate().is_ok());
    }

    #[test]
    fn test_invalid_bars() {
        assert!(bar(100.0, 101.0, 101.0, 100.5).validate().is_err());
        assert!(bar(100.0, 99.0, 98.0, 100.5).validate().is_err());
        assert!(bar(0.0, 1.0, 0.0, 1.0).validate().is_err());
        assert!(bar(f64::NAN, 1.0, 1.0, 1.0).validate().is_err());
    }

    #[test]
    fn test_generate_test_data() {
        let data = utils::generate_test_data(50, 100.0, 0.05);
        assert_eq!(data.len(), 50);
        assert!(data[0].data.open == 100.0);

        // Check that dates are sequential
        for i in 1..data.len() {
            assert!(data[i].date > data[i - 1].date);
        }
    }
}
