//! End-to-end pipeline: history -> forecast -> recommendation

use crate::config::Config;
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use log::info;
use market_data::PriceSeries;
use price_forecast::{
    EvaluationMetrics, ForecastResult, ForecastingEngine, ModelKind, ModelStore,
};
use pricing_engine::{
    MarketAnalysis, PricingEngine, PricingInsights, PricingRecommendation, PricingReport,
    PricingStrategy,
};
use serde::Serialize;

/// Column every pipeline model trains on
pub const TARGET_COLUMN: &str = "close";

/// Everything one pipeline run produced for a symbol
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub symbol: String,
    pub model: ModelKind,
    pub market_analysis: MarketAnalysis,
    pub forecast: ForecastResult,
    pub recommendation: PricingRecommendation,
    /// Hold-out score, present when the history was long enough to split
    pub evaluation: Option<EvaluationMetrics>,
    pub generated_at: DateTime<Utc>,
}

/// Forecasting and pricing engines wired from one configuration
#[derive(Debug)]
pub struct Platform {
    config: Config,
    forecasting: ForecastingEngine,
    pricing: PricingEngine,
}

impl Platform {
    /// Build the engines, opening the model cache directory
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;
        let store = ModelStore::new(&config.storage.model_dir)?;
        let forecasting = ForecastingEngine::new(config.forecast_config(), Some(store));

        Ok(Self {
            config,
            forecasting,
            pricing: PricingEngine::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn forecasting(&self) -> &ForecastingEngine {
        &self.forecasting
    }

    pub fn pricing(&self) -> &PricingEngine {
        &self.pricing
    }

    /// Register a history without running the pipeline
    pub fn ingest(&mut self, series: PriceSeries) {
        self.pricing.update_price_history(series);
    }

    /// Analyse, train, forecast and price one symbol's history.
    ///
    /// When the history holds at least twice the training minimum, the model
    /// is first scored on the last fifth before being retrained on all of it.
    pub fn run(&mut self, series: &PriceSeries, horizon: Option<usize>) -> AppResult<PipelineOutput> {
        let symbol = series.symbol().to_string();
        let model = self.config.model_kind()?;
        let strategy = self.config.strategy()?;

        let market_analysis = self.pricing.analyze_market_conditions(series)?;
        let evaluation = self.holdout_evaluation(series, model)?;

        self.forecasting
            .train_model(series, TARGET_COLUMN, model.as_str(), &symbol)?;
        if let Some(metrics) = &evaluation {
            self.forecasting
                .record_evaluation(&symbol, model, metrics.clone());
        }
        let forecast = self
            .forecasting
            .predict_prices(&symbol, horizon, model.as_str())?;

        let recommendation = self.pricing.recommend_pricing(
            market_analysis.current_price,
            Some(&forecast),
            strategy,
            &symbol,
        )?;
        info!(
            "{}: {:.2} -> {:.2} ({})",
            symbol,
            recommendation.current_price,
            recommendation.recommended_price,
            strategy
        );

        Ok(PipelineOutput {
            symbol,
            model,
            market_analysis,
            forecast,
            recommendation,
            evaluation,
            generated_at: Utc::now(),
        })
    }

    /// Report over every ingested symbol with the configured strategy
    pub fn report(&self) -> AppResult<PricingReport> {
        Ok(self
            .pricing
            .generate_pricing_report(None, self.config.strategy()?))
    }

    pub fn report_with(&self, strategy: PricingStrategy) -> PricingReport {
        self.pricing.generate_pricing_report(None, strategy)
    }

    pub fn insights(&self, symbol: &str) -> AppResult<PricingInsights> {
        Ok(self.pricing.pricing_insights(symbol)?)
    }

    fn holdout_evaluation(
        &mut self,
        series: &PriceSeries,
        model: ModelKind,
    ) -> AppResult<Option<EvaluationMetrics>> {
        let minimum = self.forecasting.config().min_training_points;
        if series.len() < 2 * minimum {
            return Ok(None);
        }

        let (train, test) = series.split_at(series.len() * 4 / 5);
        let symbol = series.symbol();
        self.forecasting
            .train_model(&train, TARGET_COLUMN, model.as_str(), symbol)?;
        let metrics = self
            .forecasting
            .evaluate_model(&test, symbol, TARGET_COLUMN, model.as_str());

        Ok((!metrics.is_failed()).then_some(metrics))
    }
}
