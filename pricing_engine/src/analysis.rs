//! Market statistics derived from a close-price history

use crate::error::{PricingEngineError, Result};
use chrono::{DateTime, Utc};
use log::debug;
use price_math::{fit_line, mean, min_max, population_std_dev, simple_returns, tail};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trailing points used for volatility
pub const VOLATILITY_WINDOW: usize = 30;
/// Trailing points used for the trend fit
pub const TREND_WINDOW: usize = 20;
/// Trailing points used for support and resistance
pub const LEVEL_WINDOW: usize = 20;

/// Normalized slope beyond which a trend is called
const TREND_THRESHOLD: f64 = 0.001;
const VOLATILE_THRESHOLD: f64 = 0.03;
const DIRECTIONAL_THRESHOLD: f64 = 0.002;
/// Histories shorter than this are always sideways
const MIN_CONDITION_POINTS: usize = 10;
const MOMENTUM_SPAN: usize = 5;

/// Direction of the fitted price trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Upward,
    Downward,
    Sideways,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Upward => "upward",
            Trend::Downward => "downward",
            Trend::Sideways => "sideways",
        };
        f.write_str(s)
    }
}

/// Coarse classification of the market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCondition {
    Bullish,
    Bearish,
    Sideways,
    Volatile,
}

impl fmt::Display for MarketCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketCondition::Bullish => "bullish",
            MarketCondition::Bearish => "bearish",
            MarketCondition::Sideways => "sideways",
            MarketCondition::Volatile => "volatile",
        };
        f.write_str(s)
    }
}

/// Population standard deviation of day-over-day returns over the last
/// `window` prices. Returns with a zero base are skipped.
pub fn calculate_volatility(prices: &[f64], window: usize) -> f64 {
    let returns = simple_returns(tail(prices, window));
    population_std_dev(&returns).unwrap_or(0.0)
}

/// Direction and strength of the least-squares slope over the last `window`
/// prices, normalized by their average
pub fn detect_trend(prices: &[f64], window: usize) -> (Trend, f64) {
    if window == 0 || prices.len() < window {
        return (Trend::Sideways, 0.0);
    }

    let recent = tail(prices, window);
    let Ok(line) = fit_line(recent) else {
        return (Trend::Sideways, 0.0);
    };
    let average = mean(recent).unwrap_or(0.0);
    let normalized = if average != 0.0 { line.slope / average } else { 0.0 };

    let trend = if normalized > TREND_THRESHOLD {
        Trend::Upward
    } else if normalized < -TREND_THRESHOLD {
        Trend::Downward
    } else {
        Trend::Sideways
    };
    (trend, normalized.abs())
}

/// Lowest and highest of the last `window` prices (all prices when shorter)
pub fn support_resistance(prices: &[f64], window: usize) -> Result<(f64, f64)> {
    Ok(min_max(tail(prices, window))?)
}

/// Classify the market from volatility first, then trend
pub fn analyze_market_condition(prices: &[f64]) -> MarketCondition {
    if prices.len() < MIN_CONDITION_POINTS {
        return MarketCondition::Sideways;
    }

    let volatility = calculate_volatility(prices, VOLATILITY_WINDOW);
    let (trend, strength) = detect_trend(prices, TREND_WINDOW);

    if volatility > VOLATILE_THRESHOLD {
        MarketCondition::Volatile
    } else if trend == Trend::Upward && strength > DIRECTIONAL_THRESHOLD {
        MarketCondition::Bullish
    } else if trend == Trend::Downward && strength > DIRECTIONAL_THRESHOLD {
        MarketCondition::Bearish
    } else {
        MarketCondition::Sideways
    }
}

/// Relative change of the last five prices' mean over the five before them
pub fn momentum(prices: &[f64]) -> f64 {
    if prices.len() < 2 * MOMENTUM_SPAN {
        return 0.0;
    }

    let last_ten = tail(prices, 2 * MOMENTUM_SPAN);
    let (older, recent) = last_ten.split_at(MOMENTUM_SPAN);
    match (mean(recent), mean(older)) {
        (Ok(recent), Ok(older)) if older != 0.0 => (recent - older) / older,
        _ => 0.0,
    }
}

/// Snapshot of market statistics for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub symbol: String,
    pub current_price: f64,
    pub volatility: f64,
    pub trend: Trend,
    pub trend_strength: f64,
    pub support_level: f64,
    pub resistance_level: f64,
    pub market_condition: MarketCondition,
    /// Highest minus lowest price over the whole history
    pub price_range: f64,
    pub average_price: f64,
    pub momentum: f64,
    pub analysis_timestamp: DateTime<Utc>,
    pub data_points: usize,
}

impl MarketAnalysis {
    /// Analyse a close-price history, oldest first
    pub fn from_prices(symbol: impl Into<String>, prices: &[f64]) -> Result<Self> {
        let symbol = symbol.into();
        let Some(&current_price) = prices.last() else {
            return Err(PricingEngineError::NoData(format!(
                "No price data provided for analysis of {}",
                symbol
            )));
        };

        let volatility = calculate_volatility(prices, VOLATILITY_WINDOW);
        let (trend, trend_strength) = detect_trend(prices, TREND_WINDOW);
        let (support_level, resistance_level) = support_resistance(prices, LEVEL_WINDOW)?;
        let (low, high) = min_max(prices)?;

        let analysis = Self {
            current_price,
            volatility,
            trend,
            trend_strength,
            support_level,
            resistance_level,
            market_condition: analyze_market_condition(prices),
            price_range: high - low,
            average_price: mean(prices)?,
            momentum: momentum(prices),
            analysis_timestamp: Utc::now(),
            data_points: prices.len(),
            symbol,
        };
        debug!(
            "{}: {} trend ({:.4}), volatility {:.4}, {}",
            analysis.symbol,
            analysis.trend,
            analysis.trend_strength,
            analysis.volatility,
            analysis.market_condition
        );
        Ok(analysis)
    }

    /// Stand-in analysis used when no history is stored for a symbol
    pub fn minimal(symbol: impl Into<String>, current_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            current_price,
            volatility: 0.02,
            trend: Trend::Sideways,
            trend_strength: 0.0,
            support_level: current_price,
            resistance_level: current_price,
            market_condition: MarketCondition::Sideways,
            price_range: 0.0,
            average_price: current_price,
            momentum: 0.0,
            analysis_timestamp: Utc::now(),
            data_points: 0,
        }
    }
}
