use market_data::utils::data_generation::generate_daily_data;
use market_data::PriceSeries;
use pricing_engine::{PricingEngine, PricingStrategy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Pricing Engine: Report Example");
    println!("==============================\n");

    let mut engine = PricingEngine::new();
    let assets = [
        ("GLD", 185.0, 0.008, 0.001),
        ("SLV", 22.5, 0.015, -0.002),
        ("IAU", 38.0, 0.04, 0.0),
    ];

    for (symbol, start, volatility, trend) in assets {
        let series = PriceSeries::new(symbol, generate_daily_data(90, start, volatility, trend))?;
        let analysis = engine.analyze_market_conditions(&series)?;
        println!(
            "{}: {} market, {} trend (strength {:.4}), volatility {:.4}",
            symbol, analysis.market_condition, analysis.trend, analysis.trend_strength, analysis.volatility
        );
    }

    for strategy in PricingStrategy::ALL {
        let report = engine.generate_pricing_report(None, strategy);
        println!("\n{} -> {}", strategy, report.summary);
        for rec in &report.recommendations {
            println!(
                "  {}: {:.2} -> {:.2} ({:+.2}%, confidence {:.2})",
                rec.symbol,
                rec.current_price,
                rec.recommended_price,
                rec.price_change_percentage(),
                rec.confidence_score
            );
        }
    }

    let gold = engine.store().get("GLD").map(|s| s.closes()).unwrap_or_default();
    let silver = engine.store().get("SLV").map(|s| s.closes()).unwrap_or_default();
    println!(
        "\nGLD/SLV return correlation: {:.3}",
        engine.analyze_cross_asset_correlation(&gold, &silver)
    );

    Ok(())
}
