//! Ordinary least squares trend line over an evenly spaced series

use crate::{MathError, Result};

/// Straight line fitted to values indexed `0, 1, 2, ...`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    /// Change in value per step
    pub slope: f64,
    /// Fitted value at index zero
    pub intercept: f64,
}

impl TrendLine {
    /// Value of the line at index `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a least-squares line to `values` against their index.
///
/// Uses the closed form `(n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)`.
pub fn fit_line(values: &[f64]) -> Result<TrendLine> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(
            "Need at least 2 points to fit a line".to_string(),
        ));
    }

    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(MathError::CalculationError(
            "Cannot calculate slope: x values have no spread".to_string(),
        ));
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(TrendLine { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_perfect_line() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let line = fit_line(&values).unwrap();

        assert_relative_eq!(line.slope, 2.0, epsilon = 1e-10);
        assert_relative_eq!(line.intercept, 3.0, epsilon = 1e-10);
        assert_relative_eq!(line.value_at(10.0), 23.0, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_series_has_zero_slope() {
        let line = fit_line(&[5.0; 8]).unwrap();
        assert_eq!(line.slope, 0.0);
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            fit_line(&[1.0]),
            Err(MathError::InsufficientData(_))
        ));
    }
}
