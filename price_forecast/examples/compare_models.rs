use market_data::utils::generate_seeded_data;
use market_data::PriceSeries;
use price_forecast::{ForecastConfig, ForecastingEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Price Forecast: Model Comparison Example");
    println!("========================================\n");

    let series = PriceSeries::new("GOLD", generate_seeded_data(2024, 200, 1950.0, 0.008))?;
    let (train, test) = series.split_at(160);
    println!("Training on {} days, testing on {} days\n", train.len(), test.len());

    let config = ForecastConfig {
        n_estimators: 50,
        ..ForecastConfig::default()
    };
    let mut engine = ForecastingEngine::new(config, None);

    for model in engine.available_models() {
        engine.train_model(&train, "close", &model, "GOLD")?;
        let metrics = engine.evaluate_model(&test, "GOLD", "close", &model);
        let forecast = engine.predict_prices("GOLD", Some(5), &model)?;

        println!("{}", model);
        println!("{}", metrics);
        for (day, price) in forecast.predicted_prices().iter().enumerate() {
            let bands = forecast.confidence_intervals();
            println!(
                "  day {}: {:.2} [{:.2}, {:.2}]",
                day + 1,
                price,
                bands.lower[day],
                bands.upper[day]
            );
        }
        println!();
    }

    Ok(())
}
