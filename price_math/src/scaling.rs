//! Column-wise z-score scaling of feature rows

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Standardizes every feature column to zero mean and unit variance.
///
/// Columns without variance are mapped to zero instead of dividing by zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    std_devs: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn per-column mean and population standard deviation
    pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        let width = match rows.first() {
            Some(row) => row.len(),
            None => {
                return Err(MathError::InsufficientData(
                    "Cannot fit a scaler without rows".to_string(),
                ))
            }
        };
        if rows.iter().any(|row| row.len() != width) {
            return Err(MathError::InvalidInput(
                "All feature rows must have the same width".to_string(),
            ));
        }

        let n = rows.len() as f64;
        let mut means = vec![0.0; width];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        means.iter_mut().for_each(|m| *m /= n);

        let mut std_devs = vec![0.0; width];
        for row in rows {
            for ((s, v), m) in std_devs.iter_mut().zip(row).zip(&means) {
                *s += (v - m).powi(2);
            }
        }
        std_devs.iter_mut().for_each(|s| *s = (*s / n).sqrt());

        self.means = means;
        self.std_devs = std_devs;
        Ok(())
    }

    /// Scale one feature row with the learned parameters
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(MathError::InvalidInput(
                "Scaler must be fitted before transforming".to_string(),
            ));
        }
        if row.len() != self.means.len() {
            return Err(MathError::InvalidInput(format!(
                "Expected {} features, got {}",
                self.means.len(),
                row.len()
            )));
        }

        Ok(row
            .iter()
            .zip(&self.means)
            .zip(&self.std_devs)
            .map(|((v, m), s)| if *s == 0.0 { 0.0 } else { (v - m) / s })
            .collect())
    }

    /// Scale every row
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Fit on `rows` and return them scaled
    pub fn fit_transform(&mut self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(rows)?;
        self.transform(rows)
    }

    pub fn is_fitted(&self) -> bool {
        !self.means.is_empty()
    }

    /// Number of feature columns the scaler was fitted on
    pub fn width(&self) -> usize {
        self.means.len()
    }
}
