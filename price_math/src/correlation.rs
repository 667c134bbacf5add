//! Pearson correlation

use crate::{MathError, Result};

/// Pearson correlation coefficient of two equally long samples.
///
/// Fails when the samples differ in length, hold fewer than two pairs, or
/// either sample has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(MathError::InvalidInput(format!(
            "Samples differ in length ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(MathError::InsufficientData(
            "Need at least 2 pairs for a correlation".to_string(),
        ));
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_x2: f64 = x.iter().map(|v| v * v).sum();
    let sum_y2: f64 = y.iter().map(|v| v * v).sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 || denominator.is_nan() {
        return Err(MathError::CalculationError(
            "Correlation undefined for a sample without variance".to_string(),
        ));
    }

    // Rounding can push a perfect correlation a hair past the unit interval
    Ok((numerator / denominator).clamp(-1.0, 1.0))
}
