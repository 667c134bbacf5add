//! Metrics for evaluating forecast performance

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Forecast performance metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Mean Absolute Percentage Error, in percent
    pub mape: f64,
    /// Fraction of consecutive moves whose direction was predicted correctly
    pub directional_accuracy: f64,
    /// R² clamped to `[0, 1]`
    pub accuracy: f64,
}

impl EvaluationMetrics {
    /// The metric set reported when a model could not be evaluated at all
    pub fn failed() -> Self {
        Self {
            mae: f64::INFINITY,
            rmse: f64::INFINITY,
            r2: -1.0,
            mape: f64::INFINITY,
            directional_accuracy: 0.0,
            accuracy: 0.0,
        }
    }

    /// Whether these are the [`EvaluationMetrics::failed`] placeholder values
    pub fn is_failed(&self) -> bool {
        self.mae.is_infinite() && self.r2 == -1.0
    }

    /// Flatten into named values, e.g. for a forecast's metric map
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("mae".to_string(), self.mae),
            ("rmse".to_string(), self.rmse),
            ("r2".to_string(), self.r2),
            ("mape".to_string(), self.mape),
            ("directional_accuracy".to_string(), self.directional_accuracy),
            ("accuracy".to_string(), self.accuracy),
        ])
    }
}

impl std::fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Performance Metrics:")?;
        writeln!(f, "  MAE:       {:.4}", self.mae)?;
        writeln!(f, "  RMSE:      {:.4}", self.rmse)?;
        writeln!(f, "  R2:        {:.4}", self.r2)?;
        writeln!(f, "  MAPE:      {:.4}%", self.mape)?;
        writeln!(f, "  Direction: {:.2}%", self.directional_accuracy * 100.0)?;
        Ok(())
    }
}

/// Score predictions against actual values
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> Result<EvaluationMetrics> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Actual and predicted values must have the same non-zero length".to_string(),
        ));
    }

    let n = actual.len() as f64;
    let errors: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| a - p).collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let rmse = (errors.iter().map(|e| e.powi(2)).sum::<f64>() / n).sqrt();

    let actual_mean = actual.iter().sum::<f64>() / n;
    let ss_res: f64 = errors.iter().map(|e| e.powi(2)).sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - actual_mean).powi(2)).sum();
    let r2 = if ss_tot != 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    // Zero actuals have no percentage error and are left out
    let (pct_sum, pct_count) = actual
        .iter()
        .zip(&errors)
        .filter(|(a, _)| **a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (a, e)| {
            (sum + (e / a).abs(), count + 1)
        });
    let mape = if pct_count > 0 {
        pct_sum / pct_count as f64 * 100.0
    } else {
        0.0
    };

    Ok(EvaluationMetrics {
        mae,
        rmse,
        r2,
        mape,
        directional_accuracy: directional_accuracy(actual, predicted),
        accuracy: r2.clamp(0.0, 1.0),
    })
}

/// Share of consecutive steps where predicted and actual agree on "went up".
///
/// A flat step counts as "not up" on both sides. Fewer than two points give 0.
pub fn directional_accuracy(actual: &[f64], predicted: &[f64]) -> f64 {
    let steps = actual.len().min(predicted.len()).saturating_sub(1);
    if steps == 0 {
        return 0.0;
    }

    let correct = actual
        .windows(2)
        .zip(predicted.windows(2))
        .filter(|(a, p)| (a[1] > a[0]) == (p[1] > p[0]))
        .count();

    correct as f64 / steps as f64
}
