//! Forecasting parameters

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Tunables shared by the forecasting models and the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Days forecast when the caller does not pass a horizon
    pub default_horizon: usize,
    /// Window of the moving-average model
    pub ma_window: usize,
    /// Trailing closes used as regression features
    pub lookback_window: usize,
    /// Trees in the random forest
    pub n_estimators: usize,
    /// Seed for the random forest's bootstrap sampling
    pub seed: u64,
    /// Smallest history the engine will train on
    pub min_training_points: usize,
    /// Default level for [`crate::ForecastingEngine::confidence_intervals`]
    pub confidence_level: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon: 30,
            ma_window: 30,
            lookback_window: 30,
            n_estimators: 100,
            seed: 42,
            min_training_points: 50,
            confidence_level: 0.95,
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("default_horizon", self.default_horizon),
            ("ma_window", self.ma_window),
            ("lookback_window", self.lookback_window),
            ("n_estimators", self.n_estimators),
        ] {
            if value == 0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be positive",
                    name
                )));
            }
        }

        if self.lookback_window < 2 {
            return Err(ForecastError::InvalidParameter(
                "lookback_window must be at least 2".to_string(),
            ));
        }

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::InvalidParameter(
                "confidence_level must be between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }
}
