//! Moving average forecasting model

use crate::error::{ForecastError, Result};
use crate::forecast::ConfidenceIntervals;
use crate::metrics::{calculate_metrics, EvaluationMetrics};
use crate::models::{check_horizon, target_values, ForecastModel, Prediction};
use log::debug;
use market_data::PriceSeries;
use price_math::{mean, tail};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Relative half-width of the moving average band
const BAND_WIDTH: f64 = 0.05;

/// Windowed mean plus a linear drift taken from the same window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageModel {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
    /// Training closes, present once fitted
    historical_data: Option<Vec<f64>>,
}

impl MovingAverageModel {
    /// Create a new moving average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Moving Average (window={})", window),
            window,
            historical_data: None,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    fn history(&self) -> Result<&[f64]> {
        self.historical_data.as_deref().ok_or_else(|| {
            ForecastError::ForecastingError("Model must be fitted before prediction".to_string())
        })
    }
}

impl ForecastModel for MovingAverageModel {
    fn fit(&mut self, series: &PriceSeries, target_column: &str) -> Result<()> {
        let prices = target_values(series, target_column)?;
        if prices.is_empty() {
            return Err(ForecastError::TrainingError(
                "Cannot fit a moving average on an empty series".to_string(),
            ));
        }

        debug!("{}: fitted on {} points", self.name, prices.len());
        self.historical_data = Some(prices);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Prediction> {
        check_horizon(horizon)?;
        let history = self.history()?;

        let recent = tail(history, self.window);
        let base = mean(recent)?;
        let trend = match (recent.first(), recent.last()) {
            (Some(first), Some(last)) => (last - first) / recent.len() as f64,
            _ => 0.0,
        };

        let values: Vec<f64> = (0..horizon).map(|i| base + trend * i as f64).collect();
        let intervals = ConfidenceIntervals::relative(&values, BAND_WIDTH);

        Ok(Prediction { values, intervals })
    }

    fn evaluate(&self, test: &PriceSeries, target_column: &str) -> EvaluationMetrics {
        let (Ok(history), Some(actual)) = (self.history(), test.column(target_column)) else {
            return EvaluationMetrics::failed();
        };

        // Rolling one-step-ahead means, the window starts on the training tail
        let mut window: VecDeque<f64> = tail(history, self.window).iter().copied().collect();
        let mut predicted = Vec::with_capacity(actual.len());
        for &value in &actual {
            let sum: f64 = window.iter().sum();
            predicted.push(if window.is_empty() {
                value
            } else {
                sum / window.len() as f64
            });
            window.push_back(value);
            if window.len() > self.window {
                window.pop_front();
            }
        }

        calculate_metrics(&actual, &predicted).unwrap_or_else(|_| EvaluationMetrics::failed())
    }

    fn is_trained(&self) -> bool {
        self.historical_data.is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
