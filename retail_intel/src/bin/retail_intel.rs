use clap::Parser;
use market_data::utils::{generate_seeded_data, generate_test_data};
use market_data::PriceSeries;
use retail_intel::{AppError, AppResult, Config, Platform};
use std::path::PathBuf;

/// Forecast a price history and recommend a price for it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Symbol the generated history is filed under
    #[arg(long, default_value = "GOLD")]
    symbol: String,

    /// Days of history to generate
    #[arg(long, default_value_t = 180)]
    days: usize,

    /// First price of the generated history
    #[arg(long, default_value_t = 1900.0)]
    start_price: f64,

    /// Daily volatility of the generated history
    #[arg(long, default_value_t = 0.01)]
    volatility: f64,

    /// Seed for a reproducible history
    #[arg(long)]
    seed: Option<u64>,

    /// Days to forecast (configured default when omitted)
    #[arg(long)]
    horizon: Option<usize>,

    /// Forecasting model: moving_average or random_forest
    #[arg(long)]
    model: Option<String>,

    /// Pricing strategy: conservative, balanced or aggressive
    #[arg(long)]
    strategy: Option<String>,

    /// JSON configuration file; environment variables are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(model) = cli.model {
        config.forecast.model = model;
    }
    if let Some(strategy) = cli.strategy {
        config.pricing.strategy = strategy;
    }
    config.validate()?;
    config.init_logging()?;

    log::info!("Starting retail_intel v{}", env!("CARGO_PKG_VERSION"));

    if cli.days == 0 {
        return Err(AppError::Config("--days must be positive".to_string()));
    }
    let records = match cli.seed {
        Some(seed) => generate_seeded_data(seed, cli.days, cli.start_price, cli.volatility),
        None => generate_test_data(cli.days, cli.start_price, cli.volatility),
    };
    let series = PriceSeries::new(cli.symbol, records)?;

    let mut platform = Platform::new(config)?;
    let output = platform.run(&series, cli.horizon)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
