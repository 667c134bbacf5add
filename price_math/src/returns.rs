//! Day-over-day percentage returns

/// Percentage returns between consecutive prices.
///
/// A step whose previous price is zero has no defined return and is skipped,
/// so the output can be shorter than `prices.len() - 1`.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// Aligned returns of two price series of the same length.
///
/// Steps where either series has a zero previous price are dropped from both
/// outputs, keeping the pairs aligned. Series of different length yield no
/// pairs.
pub fn paired_returns(a: &[f64], b: &[f64]) -> (Vec<f64>, Vec<f64>) {
    if a.len() != b.len() {
        return (Vec::new(), Vec::new());
    }

    a.windows(2)
        .zip(b.windows(2))
        .filter(|(wa, wb)| wa[0] != 0.0 && wb[0] != 0.0)
        .map(|(wa, wb)| ((wa[1] - wa[0]) / wa[0], (wb[1] - wb[0]) / wb[0]))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_returns() {
        let returns = simple_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(returns[1], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_simple_returns_skips_zero_base() {
        let returns = simple_returns(&[0.0, 10.0, 20.0]);
        assert_eq!(returns, vec![1.0]);
        assert!(simple_returns(&[5.0]).is_empty());
    }

    #[test]
    fn test_paired_returns() {
        let (ra, rb) = paired_returns(&[1.0, 2.0, 0.0, 4.0], &[2.0, 2.0, 3.0, 6.0]);
        // The step out of a zero price in `a` is dropped from both sides
        assert_eq!(ra, vec![1.0, -1.0]);
        assert_eq!(rb, vec![0.0, 0.5]);

        let (ra, rb) = paired_returns(&[1.0, 2.0], &[1.0]);
        assert!(ra.is_empty() && rb.is_empty());
    }
}
