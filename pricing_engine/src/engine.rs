//! Pricing engine: keeps price histories and turns them into recommendations

use crate::analysis::{calculate_volatility, MarketAnalysis, Trend, VOLATILITY_WINDOW};
use crate::error::{PricingEngineError, Result};
use crate::recommendation::{
    PricingInsights, PricingRecommendation, PricingReport, StrategyRecommendations,
};
use crate::strategies::{PricingRule, PricingStrategy};
use chrono::Utc;
use log::{debug, info, warn};
use market_data::{PriceSeries, PriceStore};
use price_forecast::ForecastResult;
use price_math::{paired_returns, pearson};

/// Fewer points than this cut confidence to 70%
const SPARSE_HISTORY: usize = 10;
/// Fewer points than this cut confidence to 85%
const SHORT_HISTORY: usize = 30;

/// Market analysis and price recommendations over stored histories
#[derive(Debug, Default)]
pub struct PricingEngine {
    history: PriceStore,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over an already populated store
    pub fn with_store(history: PriceStore) -> Self {
        Self { history }
    }

    pub fn store(&self) -> &PriceStore {
        &self.history
    }

    /// Analyse a price history and keep it as the symbol's current snapshot
    pub fn analyze_market_conditions(&mut self, series: &PriceSeries) -> Result<MarketAnalysis> {
        if series.is_empty() {
            return Err(PricingEngineError::NoData(format!(
                "No price data provided for analysis of {}",
                series.symbol()
            )));
        }

        let analysis = MarketAnalysis::from_prices(series.symbol(), &series.closes())?;
        self.history.insert(series.clone());
        Ok(analysis)
    }

    /// Replace the stored history for the series' symbol
    pub fn update_price_history(&mut self, series: PriceSeries) {
        debug!("Updated price history for {} ({} points)", series.symbol(), series.len());
        self.history.insert(series);
    }

    pub fn available_symbols(&self) -> Vec<String> {
        self.history.symbols()
    }

    /// Recommend a price for `symbol` under `strategy`.
    ///
    /// The analysis comes from the stored history, or a neutral stand-in when
    /// none is stored. A forecast, when given, decides the trend direction.
    pub fn recommend_pricing(
        &self,
        current_price: f64,
        forecast: Option<&ForecastResult>,
        strategy: PricingStrategy,
        symbol: &str,
    ) -> Result<PricingRecommendation> {
        if !current_price.is_finite() || current_price <= 0.0 {
            return Err(PricingEngineError::InvalidInput(format!(
                "Current price must be positive, got {}",
                current_price
            )));
        }

        let mut analysis = match self.history.get(symbol) {
            Some(series) if !series.is_empty() => {
                MarketAnalysis::from_prices(symbol, &series.closes())?
            }
            _ => MarketAnalysis::minimal(symbol, current_price),
        };

        if let Some(last) = forecast.and_then(ForecastResult::final_price) {
            analysis.trend = if last > current_price {
                Trend::Upward
            } else {
                Trend::Downward
            };
            let forecast_strength = (last - current_price).abs() / current_price;
            analysis.trend_strength = analysis.trend_strength.max(forecast_strength);
        }

        let adjustment = strategy.apply(current_price, &analysis);
        let confidence_score = strategy.base_confidence() * data_discount(analysis.data_points);
        debug!("{}: {}", symbol, adjustment.reasoning);

        Ok(PricingRecommendation {
            symbol: symbol.to_string(),
            strategy,
            current_price,
            recommended_price: adjustment.recommended_price,
            confidence_score,
            market_conditions: analysis,
            reasoning: adjustment.reasoning,
            timestamp: Utc::now(),
        })
    }

    /// Return volatility over the trailing 30 prices
    pub fn calculate_volatility(&self, prices: &[f64]) -> f64 {
        calculate_volatility(prices, VOLATILITY_WINDOW)
    }

    /// Recommendations for `symbols` (all stored symbols when `None` or
    /// empty). Symbols that cannot be priced are logged and left out.
    pub fn generate_pricing_report(
        &self,
        symbols: Option<&[String]>,
        strategy: PricingStrategy,
    ) -> PricingReport {
        let symbols = match symbols {
            Some(symbols) if !symbols.is_empty() => symbols.to_vec(),
            _ => self.available_symbols(),
        };
        if symbols.is_empty() {
            return PricingReport::empty(strategy);
        }

        let recommendations: Vec<PricingRecommendation> = symbols
            .iter()
            .filter_map(|symbol| match self.recommend_latest(symbol, strategy) {
                Ok(recommendation) => Some(recommendation),
                Err(e) => {
                    warn!("Skipping {} in pricing report: {}", symbol, e);
                    None
                }
            })
            .collect();

        let report = PricingReport::new(strategy, recommendations);
        info!("{}", report.summary);
        report
    }

    /// Analysis plus a recommendation under every strategy for one symbol
    pub fn pricing_insights(&self, symbol: &str) -> Result<PricingInsights> {
        let series = self.history.require(symbol).map_err(|_| {
            PricingEngineError::UnknownSymbol(symbol.to_string())
        })?;
        let market_analysis = MarketAnalysis::from_prices(symbol, &series.closes())?;
        let current_price = market_analysis.current_price;

        let recommend = |strategy| self.recommend_pricing(current_price, None, strategy, symbol);
        let recommendations = StrategyRecommendations {
            conservative: recommend(PricingStrategy::Conservative)?,
            balanced: recommend(PricingStrategy::Balanced)?,
            aggressive: recommend(PricingStrategy::Aggressive)?,
        };

        Ok(PricingInsights {
            symbol: symbol.to_string(),
            current_price,
            market_analysis,
            recommendations,
            insights_timestamp: Utc::now(),
        })
    }

    /// Pearson correlation of the two series' day-over-day returns.
    ///
    /// Zero when the lengths differ, fewer than two return pairs survive, or
    /// either return series is flat.
    pub fn analyze_cross_asset_correlation(&self, first: &[f64], second: &[f64]) -> f64 {
        let (a, b) = paired_returns(first, second);
        pearson(&a, &b).unwrap_or(0.0)
    }

    fn recommend_latest(
        &self,
        symbol: &str,
        strategy: PricingStrategy,
    ) -> Result<PricingRecommendation> {
        let series = self
            .history
            .get(symbol)
            .ok_or_else(|| PricingEngineError::UnknownSymbol(symbol.to_string()))?;
        let current_price = series.current_price()?;
        self.recommend_pricing(current_price, None, strategy, symbol)
    }
}

/// Confidence multiplier for the amount of history behind an analysis
fn data_discount(data_points: usize) -> f64 {
    if data_points < SPARSE_HISTORY {
        0.7
    } else if data_points < SHORT_HISTORY {
        0.85
    } else {
        1.0
    }
}
