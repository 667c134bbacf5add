//! Feature construction for the regression model

use price_math::{mean, population_std_dev, tail};

/// Number of summary features appended after the raw window closes
pub const EXTRA_FEATURES: usize = 4;

const SHORT_MA: usize = 7;
const LONG_MA: usize = 30;

/// Features describing one window of closes, oldest first.
///
/// Layout: the window itself, the 7-point mean, the 30-point mean, the
/// 30-point population standard deviation, and the percent change between the
/// last two closes. Means and deviation fall back to the whole window when it
/// is shorter than their span. Only values inside the window are used.
pub fn window_features(window: &[f64]) -> Vec<f64> {
    let mut features = Vec::with_capacity(window.len() + EXTRA_FEATURES);
    features.extend_from_slice(window);

    features.push(mean(tail(window, SHORT_MA)).unwrap_or(0.0));
    features.push(mean(tail(window, LONG_MA)).unwrap_or(0.0));
    features.push(population_std_dev(tail(window, LONG_MA)).unwrap_or(0.0));

    let pct_change = match window {
        [.., prev, last] if *prev != 0.0 => (last - prev) / prev,
        _ => 0.0,
    };
    features.push(pct_change);

    features
}

/// Sliding-window training examples: features of `prices[i..i + lookback]`
/// labelled with `prices[i + lookback]`
pub fn supervised_examples(prices: &[f64], lookback: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    if lookback == 0 || prices.len() <= lookback {
        return (Vec::new(), Vec::new());
    }

    prices
        .windows(lookback + 1)
        .map(|w| (window_features(&w[..lookback]), w[lookback]))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_features_layout() {
        let window: Vec<f64> = (1..=10).map(f64::from).collect();
        let features = window_features(&window);

        assert_eq!(features.len(), window.len() + EXTRA_FEATURES);
        assert_eq!(&features[..10], window.as_slice());
        // mean of 4..=10
        assert_relative_eq!(features[10], 7.0);
        // window shorter than 30: whole-window mean
        assert_relative_eq!(features[11], 5.5);
        assert!(features[12] > 0.0);
        assert_relative_eq!(features[13], 1.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_supervised_examples_labels() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        let (x, y) = supervised_examples(&prices, 3);

        assert_eq!(x.len(), 2);
        assert_eq!(y, vec![4.0, 5.0]);
        assert_eq!(&x[1][..3], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_supervised_examples_too_short() {
        let (x, y) = supervised_examples(&[1.0, 2.0, 3.0], 3);
        assert!(x.is_empty());
        assert!(y.is_empty());
    }
}
