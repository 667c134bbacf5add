//! Platform configuration: defaults, environment, JSON files

use crate::error::{AppError, AppResult};
use dotenv::dotenv;
use price_forecast::{ForecastConfig, ModelKind};
use pricing_engine::PricingStrategy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Platform configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forecasting configuration
    pub forecast: ForecastSettings,

    /// Pricing configuration
    pub pricing: PricingSettings,

    /// Where trained models are cached
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Forecasting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Days forecast when none is requested
    pub default_horizon: usize,

    /// Model used by the pipeline (`moving_average` or `random_forest`)
    pub model: String,

    pub ma_window: usize,

    pub lookback_window: usize,

    pub n_estimators: usize,

    pub confidence_level: f64,
}

/// Pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Strategy name (`conservative`, `balanced` or `aggressive`)
    pub strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub model_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        let base = ForecastConfig::default();
        Self {
            default_horizon: base.default_horizon,
            model: ModelKind::MovingAverage.as_str().to_string(),
            ma_window: base.ma_window,
            lookback_window: base.lookback_window,
            n_estimators: base.n_estimators,
            confidence_level: base.confidence_level,
        }
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            strategy: PricingStrategy::default().as_str().to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Parse `key` from `lookup`, keeping `default` when unset or malformed
fn parsed<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> AppResult<Self> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a configuration from a variable lookup, falling back to defaults
    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let forecast = ForecastSettings {
            default_horizon: parsed(&lookup, "FORECAST_HORIZON", defaults.forecast.default_horizon),
            model: lookup("FORECAST_MODEL").unwrap_or(defaults.forecast.model),
            ma_window: parsed(&lookup, "MA_WINDOW", defaults.forecast.ma_window),
            lookback_window: parsed(&lookup, "LOOKBACK_WINDOW", defaults.forecast.lookback_window),
            n_estimators: parsed(&lookup, "N_ESTIMATORS", defaults.forecast.n_estimators),
            confidence_level: parsed(
                &lookup,
                "CONFIDENCE_LEVEL",
                defaults.forecast.confidence_level,
            ),
        };

        let config = Config {
            forecast,
            pricing: PricingSettings {
                strategy: lookup("PRICING_STRATEGY").unwrap_or(defaults.pricing.strategy),
            },
            storage: StorageConfig {
                model_dir: lookup("MODEL_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.model_dir),
            },
            logging: LoggingConfig {
                level: lookup("LOG_LEVEL").unwrap_or(defaults.logging.level),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Check every setting is usable before the platform starts
    pub fn validate(&self) -> AppResult<()> {
        self.model_kind()?;
        self.strategy()?;
        self.forecast_config()
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(())
    }

    pub fn model_kind(&self) -> AppResult<ModelKind> {
        self.forecast
            .model
            .parse()
            .map_err(|e: price_forecast::ForecastError| AppError::Config(e.to_string()))
    }

    pub fn strategy(&self) -> AppResult<PricingStrategy> {
        self.pricing
            .strategy
            .parse()
            .map_err(|e: pricing_engine::PricingEngineError| AppError::Config(e.to_string()))
    }

    /// Model parameters for the forecasting engine
    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            default_horizon: self.forecast.default_horizon,
            ma_window: self.forecast.ma_window,
            lookback_window: self.forecast.lookback_window,
            n_estimators: self.forecast.n_estimators,
            confidence_level: self.forecast.confidence_level,
            ..ForecastConfig::default()
        }
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        };

        env_logger::Builder::new()
            .filter_level(log_level)
            .try_init()
            .map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.forecast.default_horizon, 30);
        assert_eq!(config.forecast.model, "moving_average");
        assert_eq!(config.forecast.n_estimators, 100);
        assert_eq!(config.pricing.strategy, "balanced");
        assert_eq!(config.storage.model_dir, PathBuf::from("models"));
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = Config::from_vars(lookup(&[
            ("FORECAST_HORIZON", "14"),
            ("FORECAST_MODEL", "random_forest"),
            ("PRICING_STRATEGY", "aggressive"),
            ("MODEL_DIR", "/tmp/cache"),
            ("CONFIDENCE_LEVEL", "0.9"),
        ]))
        .unwrap();

        assert_eq!(config.forecast.default_horizon, 14);
        assert_eq!(config.model_kind().unwrap(), ModelKind::RandomForest);
        assert_eq!(config.strategy().unwrap(), PricingStrategy::Aggressive);
        assert_eq!(config.storage.model_dir, PathBuf::from("/tmp/cache"));
        assert_eq!(config.forecast.confidence_level, 0.9);
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let config = Config::from_vars(lookup(&[("MA_WINDOW", "wide")])).unwrap();
        assert_eq!(config.forecast.ma_window, 30);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(Config::from_vars(lookup(&[("FORECAST_MODEL", "prophet")])).is_err());
        assert!(Config::from_vars(lookup(&[("PRICING_STRATEGY", "reckless")])).is_err());
        assert!(Config::from_vars(lookup(&[("FORECAST_HORIZON", "0")])).is_err());
        assert!(Config::from_vars(lookup(&[("CONFIDENCE_LEVEL", "1.5")])).is_err());
    }
}
