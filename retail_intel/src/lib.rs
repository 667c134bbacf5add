//! # Retail Intel
//!
//! Wires the forecasting and pricing engines into one pipeline with
//! file/environment configuration and logging setup.
//!
//! ```no_run
//! use market_data::utils::generate_test_data;
//! use market_data::PriceSeries;
//! use retail_intel::{Config, Platform};
//!
//! let config = Config::from_env()?;
//! config.init_logging()?;
//!
//! let mut platform = Platform::new(config)?;
//! let series = PriceSeries::new("GOLD", generate_test_data(120, 1900.0, 0.01))?;
//! let output = platform.run(&series, Some(14))?;
//! println!("{}", output.recommendation.reasoning);
//! # Ok::<(), retail_intel::AppError>(())
//! ```

pub mod config;
pub mod error;
pub mod platform;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use platform::{PipelineOutput, Platform, TARGET_COLUMN};
