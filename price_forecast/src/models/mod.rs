//! Forecasting models for price series

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::forecast::ConfidenceIntervals;
use crate::metrics::EvaluationMetrics;
use market_data::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod features;
pub mod moving_average;
pub mod regression;

pub use moving_average::MovingAverageModel;
pub use regression::RandomForestModel;

/// Point forecast plus its band, as produced by a model
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Forecasted values, one per day of the horizon
    pub values: Vec<f64>,
    /// Band around each value
    pub intervals: ConfidenceIntervals,
}

/// Common interface for forecasting models
pub trait ForecastModel {
    /// Train on `target_column` of the series, replacing any earlier state
    fn fit(&mut self, series: &PriceSeries, target_column: &str) -> Result<()>;

    /// Forecast `horizon` days past the end of the training data
    fn predict(&self, horizon: usize) -> Result<Prediction>;

    /// Score the model on held-out data
    fn evaluate(&self, test: &PriceSeries, target_column: &str) -> EvaluationMetrics;

    fn is_trained(&self) -> bool;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// The available model variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    MovingAverage,
    RandomForest,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::MovingAverage, ModelKind::RandomForest];

    /// Identifier used in configuration and cache file names
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::MovingAverage => "moving_average",
            ModelKind::RandomForest => "random_forest",
        }
    }

    pub fn available() -> Vec<String> {
        Self::ALL.iter().map(|k| k.as_str().to_string()).collect()
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Model '{}' not available. Available models: {:?}",
                    s,
                    Self::available()
                ))
            })
    }
}

/// A model of either kind, dispatched by variant
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeSeriesModel {
    MovingAverage(MovingAverageModel),
    Regression(RandomForestModel),
}

impl TimeSeriesModel {
    /// An untrained model of `kind` configured from `config`
    pub fn new(kind: ModelKind, config: &ForecastConfig) -> Result<Self> {
        Ok(match kind {
            ModelKind::MovingAverage => {
                TimeSeriesModel::MovingAverage(MovingAverageModel::new(config.ma_window)?)
            }
            ModelKind::RandomForest => TimeSeriesModel::Regression(RandomForestModel::new(
                config.n_estimators,
                config.lookback_window,
                config.seed,
            )?),
        })
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            TimeSeriesModel::MovingAverage(_) => ModelKind::MovingAverage,
            TimeSeriesModel::Regression(_) => ModelKind::RandomForest,
        }
    }

    fn inner(&self) -> &dyn ForecastModel {
        match self {
            TimeSeriesModel::MovingAverage(m) => m,
            TimeSeriesModel::Regression(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ForecastModel {
        match self {
            TimeSeriesModel::MovingAverage(m) => m,
            TimeSeriesModel::Regression(m) => m,
        }
    }
}

impl ForecastModel for TimeSeriesModel {
    fn fit(&mut self, series: &PriceSeries, target_column: &str) -> Result<()> {
        self.inner_mut().fit(series, target_column)
    }

    fn predict(&self, horizon: usize) -> Result<Prediction> {
        self.inner().predict(horizon)
    }

    fn evaluate(&self, test: &PriceSeries, target_column: &str) -> EvaluationMetrics {
        self.inner().evaluate(test, target_column)
    }

    fn is_trained(&self) -> bool {
        self.inner().is_trained()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }
}

/// Pull the target column out of a series for training
pub(crate) fn target_values(series: &PriceSeries, target_column: &str) -> Result<Vec<f64>> {
    series.column(target_column).ok_or_else(|| {
        ForecastError::TrainingError(format!(
            "Target column '{}' not found in data",
            target_column
        ))
    })
}

pub(crate) fn check_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::ForecastingError(
            "Forecast horizon must be at least one day".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("moving_average".parse::<ModelKind>().unwrap(), ModelKind::MovingAverage);
        assert_eq!(" Random_Forest ".parse::<ModelKind>().unwrap(), ModelKind::RandomForest);

        let err = "arima".parse::<ModelKind>().unwrap_err();
        assert!(err.to_string().contains("moving_average"));
    }

    #[test]
    fn test_new_model_is_untrained() {
        let config = ForecastConfig::default();
        for kind in ModelKind::ALL {
            let model = TimeSeriesModel::new(kind, &config).unwrap();
            assert_eq!(model.kind(), kind);
            assert!(!model.is_trained());
            assert!(matches!(
                model.predict(5),
                Err(ForecastError::ForecastingError(_))
            ));
        }
    }
}
