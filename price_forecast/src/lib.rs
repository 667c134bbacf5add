//! # Price Forecast
//!
//! Forecasting of daily price series for the retail intelligence platform.
//!
//! ## Features
//!
//! - Moving average extrapolation with a linear drift
//! - Random forest regression over sliding windows of closes
//! - Evaluation metrics (MAE, RMSE, R², MAPE, directional accuracy)
//! - A JSON model cache keyed by symbol and model
//!
//! ## Quick Start
//!
//! ```rust
//! use market_data::utils::generate_seeded_data;
//! use market_data::PriceSeries;
//! use price_forecast::{ForecastConfig, ForecastingEngine};
//!
//! let series = PriceSeries::new("GOLD", generate_seeded_data(1, 120, 1900.0, 0.01))?;
//!
//! let mut engine = ForecastingEngine::new(ForecastConfig::default(), None);
//! engine.train_model(&series, "close", "moving_average", "GOLD")?;
//!
//! let forecast = engine.predict_prices("GOLD", Some(7), "moving_average")?;
//! assert_eq!(forecast.predicted_prices().len(), 7);
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod persistence;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::engine::{ForecastingEngine, ModelInfo, ModelStatus};
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::{ConfidenceIntervals, ForecastResult};
pub use crate::metrics::{calculate_metrics, EvaluationMetrics};
pub use crate::models::{ForecastModel, ModelKind, Prediction, TimeSeriesModel};
pub use crate::persistence::ModelStore;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
