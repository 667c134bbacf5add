use market_data::utils::generate_seeded_data;
use market_data::PriceSeries;
use pretty_assertions::assert_eq;
use price_forecast::ModelKind;
use retail_intel::{AppError, Config, Platform};
use tempfile::tempdir;

fn series(symbol: &str, days: usize) -> PriceSeries {
    PriceSeries::new(symbol, generate_seeded_data(99, days, 24.0, 0.012)).unwrap()
}

fn config_in(dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.storage.model_dir = dir.join("models");
    config.forecast.n_estimators = 10;
    config.forecast.lookback_window = 10;
    config
}

#[test]
fn test_pipeline_with_moving_average() {
    let dir = tempdir().unwrap();
    let mut platform = Platform::new(config_in(dir.path())).unwrap();

    let output = platform.run(&series("SLV", 120), Some(10)).unwrap();

    assert_eq!(output.model, ModelKind::MovingAverage);
    assert_eq!(output.forecast.horizon(), 10);
    assert_eq!(output.market_analysis.data_points, 120);
    let evaluation = output.evaluation.clone().unwrap();
    assert_eq!(output.forecast.accuracy_score(), evaluation.accuracy);
    assert_eq!(output.forecast.metrics()["mae"], evaluation.mae);
    assert_eq!(
        output.recommendation.current_price,
        output.market_analysis.current_price
    );
    assert!((0.0..=1.0).contains(&output.recommendation.confidence_score));
    assert!(dir
        .path()
        .join("models")
        .join("SLV_moving_average.json")
        .exists());
}

#[test]
fn test_pipeline_with_random_forest() {
    let dir = tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.forecast.model = "random_forest".to_string();
    config.pricing.strategy = "aggressive".to_string();

    let mut platform = Platform::new(config).unwrap();
    let output = platform.run(&series("GLD", 70), None).unwrap();

    assert_eq!(output.forecast.horizon(), 30);
    assert!(output.evaluation.is_none());
    assert!(output.recommendation.reasoning.starts_with("Aggressive strategy"));

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["model"], "random_forest");
    assert!(json["recommendation"]["price_change_percentage"].is_number());
}

#[test]
fn test_short_history_fails_training() {
    let dir = tempdir().unwrap();
    let mut platform = Platform::new(config_in(dir.path())).unwrap();

    let err = platform.run(&series("ETF", 30), Some(5)).unwrap_err();
    assert!(matches!(err, AppError::Forecast(_)));
}

#[test]
fn test_report_and_insights() {
    let dir = tempdir().unwrap();
    let mut platform = Platform::new(config_in(dir.path())).unwrap();
    platform.ingest(series("GLD", 60));
    platform.ingest(series("SLV", 60));

    let report = platform.report().unwrap();
    assert_eq!(report.symbols_analyzed, 2);

    let insights = platform.insights("GLD").unwrap();
    assert_eq!(insights.market_analysis.data_points, 60);
    assert!(matches!(
        platform.insights("PLAT"),
        Err(AppError::Pricing(_))
    ));
}

#[test]
fn test_config_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = config_in(dir.path());
    config.forecast.default_horizon = 7;
    config.logging.level = "debug".to_string();
    config.to_file(&path).unwrap();

    assert_eq!(Config::from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_config_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"pricing": {"strategy": "conservative"}}"#).unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.pricing.strategy, "conservative");
    assert_eq!(config.forecast.default_horizon, 30);
}

#[test]
fn test_invalid_config_file_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"forecast": {"model": "arima"}}"#).unwrap();

    assert!(matches!(Config::from_file(&path), Err(AppError::Config(_))));
}
