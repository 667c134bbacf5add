//! Forecast output records

use crate::error::{ForecastError, Result};
use crate::models::Prediction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower and upper bound per predicted point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervals {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl ConfidenceIntervals {
    /// A band of `±width` (as a fraction) around every value.
    ///
    /// The two bounds are ordered per point, so the band still brackets the
    /// value when a prediction comes out negative.
    pub fn relative(values: &[f64], width: f64) -> Self {
        let (lower, upper) = values
            .iter()
            .map(|&p| {
                let a = p * (1.0 - width);
                let b = p * (1.0 + width);
                (a.min(b), a.max(b))
            })
            .unzip();

        Self { lower, upper }
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Whether every value lies inside its band
    pub fn brackets(&self, values: &[f64]) -> bool {
        values.len() == self.lower.len()
            && values.len() == self.upper.len()
            && values
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}

/// Result of a forecast operation for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    symbol: String,
    model_name: String,
    forecast_horizon: usize,
    predicted_prices: Vec<f64>,
    confidence_intervals: ConfidenceIntervals,
    model_metrics: BTreeMap<String, f64>,
    timestamp: DateTime<Utc>,
}

impl ForecastResult {
    /// Create a new forecast result from a model prediction
    pub fn new(
        symbol: impl Into<String>,
        model_name: impl Into<String>,
        prediction: Prediction,
        model_metrics: BTreeMap<String, f64>,
    ) -> Result<Self> {
        let Prediction { values, intervals } = prediction;

        if intervals.lower.len() != values.len() || intervals.upper.len() != values.len() {
            return Err(ForecastError::ForecastingError(format!(
                "Values length ({}) doesn't match intervals length ({}/{})",
                values.len(),
                intervals.lower.len(),
                intervals.upper.len()
            )));
        }

        Ok(Self {
            symbol: symbol.into(),
            model_name: model_name.into(),
            forecast_horizon: values.len(),
            predicted_prices: values,
            confidence_intervals: intervals,
            model_metrics,
            timestamp: Utc::now(),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Number of days forecast
    pub fn horizon(&self) -> usize {
        self.forecast_horizon
    }

    pub fn predicted_prices(&self) -> &[f64] {
        &self.predicted_prices
    }

    pub fn confidence_intervals(&self) -> &ConfidenceIntervals {
        &self.confidence_intervals
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.model_metrics
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The model's `accuracy` metric, or zero when it was not evaluated
    pub fn accuracy_score(&self) -> f64 {
        self.model_metrics.get("accuracy").copied().unwrap_or(0.0)
    }

    /// Prediction for the final day of the horizon
    pub fn final_price(&self) -> Option<f64> {
        self.predicted_prices.last().copied()
    }

    /// Serialize the forecast to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_band() {
        let band = ConfidenceIntervals::relative(&[100.0, 200.0], 0.05);
        assert_relative_eq!(band.lower[0], 95.0, epsilon = 1e-9);
        assert_relative_eq!(band.lower[1], 190.0, epsilon = 1e-9);
        assert_relative_eq!(band.upper[0], 105.0, epsilon = 1e-9);
        assert_relative_eq!(band.upper[1], 210.0, epsilon = 1e-9);
        assert!(band.brackets(&[100.0, 200.0]));
    }

    #[test]
    fn test_band_orders_negative_values() {
        let band = ConfidenceIntervals::relative(&[-10.0], 0.08);
        assert!(band.lower[0] < band.upper[0]);
        assert!(band.brackets(&[-10.0]));
    }

    #[test]
    fn test_result_rejects_mismatched_bands() {
        let prediction = Prediction {
            values: vec![1.0, 2.0],
            intervals: ConfidenceIntervals::relative(&[1.0], 0.05),
        };
        assert!(ForecastResult::new("GOLD", "moving_average", prediction, BTreeMap::new()).is_err());
    }

    #[test]
    fn test_accuracy_score_defaults_to_zero() {
        let prediction = Prediction {
            values: vec![1.0],
            intervals: ConfidenceIntervals::relative(&[1.0], 0.05),
        };
        let result =
            ForecastResult::new("GOLD", "moving_average", prediction, BTreeMap::new()).unwrap();
        assert_eq!(result.accuracy_score(), 0.0);
        assert_eq!(result.horizon(), 1);
        assert!(result.to_json().unwrap().contains("\"symbol\":\"GOLD\""));
    }
}
