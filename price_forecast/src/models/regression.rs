//! Random forest regression over sliding price windows

use crate::error::{ForecastError, Result};
use crate::forecast::ConfidenceIntervals;
use crate::metrics::{calculate_metrics, EvaluationMetrics};
use crate::models::features::{supervised_examples, window_features};
use crate::models::{check_horizon, target_values, ForecastModel, Prediction};
use log::{debug, info};
use market_data::PriceSeries;
use price_math::{tail, StandardScaler};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fmt;

/// Relative half-width of the regression band
const BAND_WIDTH: f64 = 0.08;

/// Fewest points the model will train on
pub const MIN_TRAINING_POINTS: usize = 50;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

#[derive(Serialize, Deserialize)]
struct FittedForest {
    forest: Forest,
    scaler: StandardScaler,
    /// Trailing `lookback_window` closes the recursive forecast starts from
    last_values: Vec<f64>,
}

/// Random forest trained on windowed closes plus summary features
#[derive(Serialize, Deserialize)]
pub struct RandomForestModel {
    name: String,
    n_estimators: usize,
    lookback_window: usize,
    seed: u64,
    state: Option<FittedForest>,
}

impl fmt::Debug for RandomForestModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForestModel")
            .field("name", &self.name)
            .field("n_estimators", &self.n_estimators)
            .field("lookback_window", &self.lookback_window)
            .field("seed", &self.seed)
            .field("trained", &self.state.is_some())
            .finish()
    }
}

impl RandomForestModel {
    /// Create a new random forest model
    pub fn new(n_estimators: usize, lookback_window: usize, seed: u64) -> Result<Self> {
        if n_estimators == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of estimators must be positive".to_string(),
            ));
        }
        if lookback_window < 2 {
            return Err(ForecastError::InvalidParameter(
                "Lookback window must be at least 2".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Random Forest (trees={}, lookback={})",
                n_estimators, lookback_window
            ),
            n_estimators,
            lookback_window,
            seed,
            state: None,
        })
    }

    pub fn lookback_window(&self) -> usize {
        self.lookback_window
    }

    fn fitted(&self) -> Result<&FittedForest> {
        self.state.as_ref().ok_or_else(|| {
            ForecastError::ForecastingError("Model must be fitted before prediction".to_string())
        })
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    let refs: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
    DenseMatrix::from_2d_array(&refs)
        .map_err(|e| ForecastError::TrainingError(format!("Failed to build feature matrix: {:?}", e)))
}

impl FittedForest {
    fn predict_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        let scaled = self.scaler.transform(rows)?;
        let x = to_matrix(&scaled)?;
        self.forest
            .predict(&x)
            .map_err(|e| ForecastError::ForecastingError(format!("Prediction failed: {:?}", e)))
    }
}

impl ForecastModel for RandomForestModel {
    fn fit(&mut self, series: &PriceSeries, target_column: &str) -> Result<()> {
        let prices = target_values(series, target_column)?;

        let required = MIN_TRAINING_POINTS.max(self.lookback_window + 1);
        if prices.len() < required {
            return Err(ForecastError::TrainingError(format!(
                "Insufficient data for training. Need at least {} data points, got {}",
                required,
                prices.len()
            )));
        }

        let (features, targets) = supervised_examples(&prices, self.lookback_window);
        if features.is_empty() {
            return Err(ForecastError::TrainingError(
                "Could not build any training examples".to_string(),
            ));
        }

        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&features)?;
        let x = to_matrix(&scaled)?;

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_estimators as _)
            .with_seed(self.seed);
        let forest = RandomForestRegressor::fit(&x, &targets, params)
            .map_err(|e| ForecastError::TrainingError(format!("Random forest training failed: {:?}", e)))?;

        info!(
            "{}: trained on {} examples with {} features",
            self.name,
            features.len(),
            scaler.width()
        );

        self.state = Some(FittedForest {
            forest,
            scaler,
            last_values: tail(&prices, self.lookback_window).to_vec(),
        });
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Prediction> {
        check_horizon(horizon)?;
        let state = self.fitted()?;

        let mut window = state.last_values.clone();
        let mut values = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let next = state
                .predict_rows(&[window_features(&window)])?
                .first()
                .copied()
                .ok_or_else(|| ForecastError::ForecastingError("Empty prediction".to_string()))?;

            values.push(next);
            window.rotate_left(1);
            if let Some(last) = window.last_mut() {
                *last = next;
            }
        }
        debug!("{}: forecast {} steps", self.name, horizon);

        let intervals = ConfidenceIntervals::relative(&values, BAND_WIDTH);
        Ok(Prediction { values, intervals })
    }

    fn evaluate(&self, test: &PriceSeries, target_column: &str) -> EvaluationMetrics {
        let (Ok(state), Some(prices)) = (self.fitted(), test.column(target_column)) else {
            return EvaluationMetrics::failed();
        };

        let (features, actual) = supervised_examples(&prices, self.lookback_window);
        if features.is_empty() {
            return EvaluationMetrics::failed();
        }

        state
            .predict_rows(&features)
            .and_then(|predicted| calculate_metrics(&actual, &predicted))
            .unwrap_or_else(|_| EvaluationMetrics::failed())
    }

    fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use market_data::utils::generate_seeded_data;

    fn series(n: usize) -> PriceSeries {
        PriceSeries::new("TEST", generate_seeded_data(7, n, 100.0, 0.01)).unwrap()
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(RandomForestModel::new(0, 30, 42).is_err());
        assert!(RandomForestModel::new(10, 1, 42).is_err());
    }

    #[test]
    fn test_fit_requires_fifty_points() {
        let mut model = RandomForestModel::new(5, 10, 42).unwrap();
        let err = model.fit(&series(49), "close").unwrap_err();
        assert!(matches!(err, ForecastError::TrainingError(_)));
        assert!(!model.is_trained());
    }

    #[test]
    fn test_fit_requires_lookback_plus_one() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let short = PriceSeries::from_closes("TEST", start, &closes).unwrap();

        let mut model = RandomForestModel::new(5, 60, 42).unwrap();
        assert!(matches!(
            model.fit(&short, "close"),
            Err(ForecastError::TrainingError(_))
        ));
    }

    #[test]
    fn test_fit_and_predict() {
        let mut model = RandomForestModel::new(10, 10, 42).unwrap();
        model.fit(&series(80), "close").unwrap();
        assert!(model.is_trained());

        let prediction = model.predict(5).unwrap();
        assert_eq!(prediction.values.len(), 5);
        assert!(prediction.values.iter().all(|v| v.is_finite()));
        assert!(prediction.intervals.brackets(&prediction.values));
    }

    #[test]
    fn test_evaluate_short_test_series_is_failed() {
        let mut model = RandomForestModel::new(5, 10, 42).unwrap();
        model.fit(&series(60), "close").unwrap();

        let metrics = model.evaluate(&series(5), "close");
        assert!(metrics.is_failed());
    }
}
