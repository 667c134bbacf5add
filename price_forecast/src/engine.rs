//! Forecasting engine: trains, caches and queries models per symbol

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::forecast::{ConfidenceIntervals, ForecastResult};
use crate::metrics::EvaluationMetrics;
use crate::models::{ForecastModel, ModelKind, TimeSeriesModel};
use crate::persistence::ModelStore;
use log::{debug, info, warn};
use market_data::PriceSeries;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Whether a model kind has been trained for any symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStatus {
    pub name: String,
    pub trained: bool,
}

/// Snapshot of what the engine can do and what it has trained
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub available_models: Vec<String>,
    pub trained_symbols: Vec<String>,
    pub model_status: Vec<ModelStatus>,
}

/// Trains and serves forecasting models keyed by `(symbol, model)`
#[derive(Debug)]
pub struct ForecastingEngine {
    config: ForecastConfig,
    store: Option<ModelStore>,
    models: HashMap<(String, ModelKind), TimeSeriesModel>,
    evaluations: HashMap<(String, ModelKind), EvaluationMetrics>,
    trained_symbols: BTreeSet<String>,
}

impl ForecastingEngine {
    /// Create an engine; with a store, trained models are cached on disk
    pub fn new(config: ForecastConfig, store: Option<ModelStore>) -> Self {
        Self {
            config,
            store,
            models: HashMap::new(),
            evaluations: HashMap::new(),
            trained_symbols: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn available_models(&self) -> Vec<String> {
        ModelKind::available()
    }

    /// Fit `model_name` on one column of the series and cache it for `symbol`
    pub fn train_model(
        &mut self,
        series: &PriceSeries,
        target_column: &str,
        model_name: &str,
        symbol: &str,
    ) -> Result<()> {
        let kind: ModelKind = model_name
            .parse()
            .map_err(|e: ForecastError| ForecastError::TrainingError(e.to_string()))?;

        if !series.has_column(target_column) {
            return Err(ForecastError::TrainingError(format!(
                "Target column '{}' not found in data",
                target_column
            )));
        }
        if series.len() < self.config.min_training_points {
            return Err(ForecastError::TrainingError(format!(
                "Insufficient data for training. Need at least {} data points, got {}",
                self.config.min_training_points,
                series.len()
            )));
        }

        let mut model = TimeSeriesModel::new(kind, &self.config).map_err(into_training)?;
        model.fit(series, target_column).map_err(into_training)?;
        info!(
            "Trained {} for {} on {} points",
            model.name(),
            symbol,
            series.len()
        );

        if let Some(store) = &self.store {
            if let Err(e) = store.save(symbol, &model) {
                warn!("Could not cache {} model for {}: {}", kind, symbol, e);
            }
        }

        let key = (symbol.to_string(), kind);
        self.evaluations.remove(&key);
        self.models.insert(key, model);
        self.trained_symbols.insert(symbol.to_string());
        Ok(())
    }

    /// Forecast `horizon` days (configured default when `None`)
    pub fn predict_prices(
        &mut self,
        symbol: &str,
        horizon: Option<usize>,
        model_name: &str,
    ) -> Result<ForecastResult> {
        let kind: ModelKind = model_name
            .parse()
            .map_err(|e: ForecastError| ForecastError::ForecastingError(e.to_string()))?;
        let horizon = horizon.unwrap_or(self.config.default_horizon);

        let model = self.model_for(symbol, kind).ok_or_else(|| {
            ForecastError::ForecastingError(format!(
                "Model '{}' for symbol '{}' is not trained",
                kind, symbol
            ))
        })?;
        let prediction = model.predict(horizon)?;
        debug!("Forecast {} days for {} with {}", horizon, symbol, kind);

        let metrics = self
            .evaluations
            .get(&(symbol.to_string(), kind))
            .map(EvaluationMetrics::to_map)
            .unwrap_or_default();

        ForecastResult::new(symbol, kind.as_str(), prediction, metrics)
    }

    /// Score a trained model on held-out data.
    ///
    /// Returns the failed metric set when no model is available for the pair.
    pub fn evaluate_model(
        &mut self,
        test: &PriceSeries,
        symbol: &str,
        target_column: &str,
        model_name: &str,
    ) -> EvaluationMetrics {
        let Ok(kind) = model_name.parse::<ModelKind>() else {
            warn!("Cannot evaluate unknown model '{}'", model_name);
            return EvaluationMetrics::failed();
        };
        let Some(model) = self.model_for(symbol, kind) else {
            warn!("No trained {} model for {}", kind, symbol);
            return EvaluationMetrics::failed();
        };

        let metrics = model.evaluate(test, target_column);
        self.record_evaluation(symbol, kind, metrics.clone());
        metrics
    }

    /// Attach metrics to the pair so later forecasts report them.
    ///
    /// Failed metric sets are ignored. Retraining clears the entry.
    pub fn record_evaluation(&mut self, symbol: &str, kind: ModelKind, metrics: EvaluationMetrics) {
        if !metrics.is_failed() {
            self.evaluations.insert((symbol.to_string(), kind), metrics);
        }
    }

    /// Symmetric band of `(1 - level) / 2` around each prediction
    pub fn confidence_intervals(
        &self,
        predictions: &[f64],
        confidence_level: Option<f64>,
    ) -> ConfidenceIntervals {
        let level = confidence_level.unwrap_or(self.config.confidence_level);
        ConfidenceIntervals::relative(predictions, (1.0 - level) / 2.0)
    }

    pub fn model_info(&self) -> ModelInfo {
        let model_status = ModelKind::ALL
            .iter()
            .map(|kind| ModelStatus {
                name: kind.as_str().to_string(),
                trained: self.models.keys().any(|(_, k)| k == kind),
            })
            .collect();

        ModelInfo {
            available_models: self.available_models(),
            trained_symbols: self.trained_symbols.iter().cloned().collect(),
            model_status,
        }
    }

    /// Last evaluation metrics recorded for the pair, if any
    pub fn last_evaluation(&self, symbol: &str, model_name: &str) -> Option<&EvaluationMetrics> {
        let kind = model_name.parse::<ModelKind>().ok()?;
        self.evaluations.get(&(symbol.to_string(), kind))
    }

    /// In-memory model for the pair, loading it from the store on a miss
    fn model_for(&mut self, symbol: &str, kind: ModelKind) -> Option<&TimeSeriesModel> {
        let key = (symbol.to_string(), kind);
        if !self.models.contains_key(&key) {
            let loaded = self.load_cached(symbol, kind)?;
            self.trained_symbols.insert(symbol.to_string());
            self.models.insert(key.clone(), loaded);
        }
        self.models.get(&key)
    }

    fn load_cached(&self, symbol: &str, kind: ModelKind) -> Option<TimeSeriesModel> {
        let store = self.store.as_ref()?;
        match store.load(symbol, kind) {
            Ok(Some(model)) if model.is_trained() => {
                info!("Loaded cached {} model for {}", kind, symbol);
                Some(model)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Could not load cached {} model for {}: {}", kind, symbol, e);
                None
            }
        }
    }
}

fn into_training(err: ForecastError) -> ForecastError {
    match err {
        ForecastError::TrainingError(_) => err,
        other => ForecastError::TrainingError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_data::utils::generate_seeded_data;

    fn series(symbol: &str, n: usize) -> PriceSeries {
        PriceSeries::new(symbol, generate_seeded_data(3, n, 50.0, 0.02)).unwrap()
    }

    #[test]
    fn test_available_models() {
        let engine = ForecastingEngine::new(ForecastConfig::default(), None);
        assert_eq!(
            engine.available_models(),
            vec!["moving_average".to_string(), "random_forest".to_string()]
        );
    }

    #[test]
    fn test_unknown_model_is_training_error() {
        let mut engine = ForecastingEngine::new(ForecastConfig::default(), None);
        let err = engine
            .train_model(&series("GOLD", 60), "close", "lstm", "GOLD")
            .unwrap_err();

        assert!(matches!(err, ForecastError::TrainingError(_)));
        assert!(err.to_string().contains("random_forest"));
    }

    #[test]
    fn test_models_are_kept_per_symbol() {
        let mut engine = ForecastingEngine::new(ForecastConfig::default(), None);
        engine
            .train_model(&series("GOLD", 60), "close", "moving_average", "GOLD")
            .unwrap();

        assert!(engine.predict_prices("GOLD", Some(3), "moving_average").is_ok());
        assert!(matches!(
            engine.predict_prices("SILVER", Some(3), "moving_average"),
            Err(ForecastError::ForecastingError(_))
        ));
    }

    #[test]
    fn test_confidence_intervals_margin() {
        let engine = ForecastingEngine::new(ForecastConfig::default(), None);
        let bands = engine.confidence_intervals(&[100.0], Some(0.9));

        approx::assert_relative_eq!(bands.lower[0], 95.0, epsilon = 1e-9);
        approx::assert_relative_eq!(bands.upper[0], 105.0, epsilon = 1e-9);
    }

    #[test]
    fn test_model_info_tracks_training() {
        let mut engine = ForecastingEngine::new(ForecastConfig::default(), None);
        engine
            .train_model(&series("SLV", 60), "close", "moving_average", "SLV")
            .unwrap();

        let info = engine.model_info();
        assert_eq!(info.trained_symbols, vec!["SLV".to_string()]);
        assert!(info.model_status[0].trained);
        assert!(!info.model_status[1].trained);
    }

    #[test]
    fn test_invalid_model_parameters_are_training_errors() {
        let config = ForecastConfig {
            lookback_window: 0,
            ..ForecastConfig::default()
        };
        let mut engine = ForecastingEngine::new(config, None);
        let err = engine
            .train_model(&series("GOLD", 60), "close", "random_forest", "GOLD")
            .unwrap_err();

        assert!(matches!(err, ForecastError::TrainingError(_)));
    }

    #[test]
    fn test_recorded_evaluation_survives_into_forecast() {
        let mut engine = ForecastingEngine::new(ForecastConfig::default(), None);
        engine
            .train_model(&series("GOLD", 60), "close", "moving_average", "GOLD")
            .unwrap();

        let metrics = EvaluationMetrics {
            mae: 1.5,
            rmse: 2.0,
            r2: 0.7,
            mape: 3.0,
            directional_accuracy: 0.6,
            accuracy: 0.7,
        };
        engine.record_evaluation("GOLD", ModelKind::MovingAverage, metrics);
        let forecast = engine.predict_prices("GOLD", Some(2), "moving_average").unwrap();
        assert_eq!(forecast.accuracy_score(), 0.7);

        engine.record_evaluation("GOLD", ModelKind::MovingAverage, EvaluationMetrics::failed());
        assert_eq!(
            engine.last_evaluation("GOLD", "moving_average").map(|m| m.accuracy),
            Some(0.7)
        );
    }
}
