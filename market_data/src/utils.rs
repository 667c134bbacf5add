//! Synthetic price generation for demos and tests
//!
//! Real histories come from an external loader; these helpers produce
//! plausible random walks that satisfy the bar invariants.

use crate::{DailyOhlcv, OhlcvData};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn make_bar<R: Rng>(rng: &mut R, date: NaiveDate, open: f64, close: f64, volatility: f64) -> DailyOhlcv {
    let body_low = open.min(close);
    let body_high = open.max(close);

    // Wicks scale with volatility; the low is floored so it stays positive
    let high = body_high + rng.random::<f64>() * volatility * open * 0.5;
    let low = (body_low - rng.random::<f64>() * volatility * open * 0.5).max(body_low * 0.5);

    DailyOhlcv {
        date,
        data: OhlcvData {
            open,
            high,
            low,
            close,
            volume: rng.random_range(1000..10000),
        },
    }
}

fn random_walk<R: Rng>(
    rng: &mut R,
    num_points: usize,
    starting_price: f64,
    volatility: f64,
    trend: f64,
) -> Vec<DailyOhlcv> {
    let mut data = Vec::with_capacity(num_points);
    let mut current_price = starting_price;
    let start = base_date();

    for i in 0..num_points {
        let price_change = current_price * volatility * (rng.random::<f64>() - 0.5);
        let open = current_price;
        // Keep a floor so a long downtrend never reaches zero
        let close = (open * (1.0 + trend) + price_change).max(open * 0.5);

        let date = start + Days::new(i as u64);
        data.push(make_bar(rng, date, open, close, volatility));

        current_price = close;
    }

    data
}

/// Generate dummy OHLCV data for testing purposes
///
/// # Arguments
/// * `num_points` - Number of data points to generate
/// * `starting_price` - Initial price for the first data point
/// * `volatility` - Price volatility factor (0.0-1.0)
///
/// # Returns
/// * Vector of DailyOhlcv data points on consecutive days from 2023-01-01
pub fn generate_test_data(num_points: usize, starting_price: f64, volatility: f64) -> Vec<DailyOhlcv> {
    let mut rng = rand::rng();
    random_walk(&mut rng, num_points, starting_price, volatility, 0.0)
}

/// Same as [`generate_test_data`] but reproducible for a given seed
pub fn generate_seeded_data(
    seed: u64,
    num_points: usize,
    starting_price: f64,
    volatility: f64,
) -> Vec<DailyOhlcv> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_walk(&mut rng, num_points, starting_price, volatility, 0.0)
}

pub mod data_generation {
    use super::random_walk;
    use crate::DailyOhlcv;

    /// Generate test data with a given per-day drift and volatility
    pub fn generate_daily_data(
        days: usize,
        starting_price: f64,
        volatility: f64,
        trend: f64,
    ) -> Vec<DailyOhlcv> {
        let mut rng = rand::rng();
        random_walk(&mut rng, days, starting_price, volatility, trend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_bars_are_valid() {
        for bar in generate_test_data(200, 25.0, 0.3) {
            assert!(bar.data.validate().is_ok(), "invalid bar {:?}", bar);
        }
    }

    #[test]
    fn test_seeded_data_is_reproducible() {
        let a = generate_seeded_data(7, 40, 1800.0, 0.02);
        let b = generate_seeded_data(7, 40, 1800.0, 0.02);
        assert_eq!(a, b);
    }

    #[test]
    fn test_trend_moves_prices() {
        let data = data_generation::generate_daily_data(60, 100.0, 0.0, 0.01);
        assert!(data.last().unwrap().data.close > 150.0);
    }
}
