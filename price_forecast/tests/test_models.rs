use chrono::NaiveDate;
use market_data::utils::generate_seeded_data;
use market_data::PriceSeries;
use price_forecast::models::{MovingAverageModel, RandomForestModel};
use price_forecast::{ForecastConfig, ForecastError, ForecastModel, ModelKind, TimeSeriesModel};
use rstest::rstest;

fn generated(n: usize) -> PriceSeries {
    PriceSeries::new("GOLD", generate_seeded_data(11, n, 1900.0, 0.01)).unwrap()
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(30)]
fn test_moving_average_horizon_and_bounds(#[case] horizon: usize) {
    let mut model = MovingAverageModel::new(30).unwrap();
    model.fit(&generated(100), "close").unwrap();

    let prediction = model.predict(horizon).unwrap();
    assert_eq!(prediction.values.len(), horizon);
    assert_eq!(prediction.intervals.len(), horizon);
    assert!(prediction.intervals.brackets(&prediction.values));
}

#[test]
fn test_jump_at_end_of_window() {
    let mut closes = vec![100.0; 29];
    closes.push(200.0);
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let series = PriceSeries::from_closes("ETF", start, &closes).unwrap();

    let mut model = MovingAverageModel::new(30).unwrap();
    model.fit(&series, "close").unwrap();
    let prediction = model.predict(10).unwrap();

    assert!((prediction.values[0] - 103.333).abs() < 1e-3);
    assert!(prediction.values.windows(2).all(|w| w[1] > w[0]));
}

#[rstest]
#[case(ModelKind::MovingAverage)]
#[case(ModelKind::RandomForest)]
fn test_missing_column_is_training_error(#[case] kind: ModelKind) {
    let mut model = TimeSeriesModel::new(kind, &ForecastConfig::default()).unwrap();
    let err = model.fit(&generated(80), "sales").unwrap_err();
    assert!(matches!(err, ForecastError::TrainingError(_)));
}

#[test]
fn test_random_forest_roundtrip_through_json() {
    let mut model = RandomForestModel::new(8, 10, 42).unwrap();
    model.fit(&generated(70), "close").unwrap();
    let before = model.predict(3).unwrap();

    let json = serde_json::to_string(&model).unwrap();
    let restored: RandomForestModel = serde_json::from_str(&json).unwrap();
    let after = restored.predict(3).unwrap();

    assert_eq!(before.values, after.values);
}

#[test]
fn test_random_forest_evaluation_on_held_out_data() {
    let (train, test) = generated(120).split_at(90);

    let mut model = RandomForestModel::new(10, 10, 42).unwrap();
    model.fit(&train, "close").unwrap();
    let metrics = model.evaluate(&test, "close");

    assert!(!metrics.is_failed());
    assert!(metrics.mae.is_finite());
    assert!((0.0..=1.0).contains(&metrics.accuracy));
    assert!((0.0..=1.0).contains(&metrics.directional_accuracy));
}

#[test]
fn test_refit_replaces_state() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let low = PriceSeries::from_closes("X", start, &[10.0; 40]).unwrap();
    let high = PriceSeries::from_closes("X", start, &[90.0; 40]).unwrap();

    let mut model = MovingAverageModel::new(5).unwrap();
    model.fit(&low, "close").unwrap();
    model.fit(&high, "close").unwrap();

    assert_eq!(model.predict(1).unwrap().values, vec![90.0]);
}
