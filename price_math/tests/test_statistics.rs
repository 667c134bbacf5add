use approx::assert_relative_eq;
use price_math::{fit_line, mean, paired_returns, pearson, population_std_dev, simple_returns};
use rstest::rstest;

#[rstest]
#[case(vec![1.0, 2.0, 3.0, 4.0, 5.0], true)]
#[case(vec![10.0, 9.5, 9.0, 7.0, 6.5], false)]
#[case(vec![100.0, 100.5, 101.7, 102.0, 104.3, 104.4], true)]
fn test_slope_sign_follows_direction(#[case] values: Vec<f64>, #[case] rising: bool) {
    let line = fit_line(&values).unwrap();
    assert_eq!(line.slope > 0.0, rising);
}

#[test]
fn test_return_volatility_of_constant_prices() {
    let returns = simple_returns(&[42.0; 30]);
    assert_eq!(returns.len(), 29);
    assert_eq!(population_std_dev(&returns).unwrap(), 0.0);
}

#[test]
fn test_returns_correlation_workflow() {
    let gold = [1800.0, 1812.0, 1799.0, 1820.0, 1835.0, 1828.0];
    let silver = [22.0, 22.3, 21.9, 22.6, 23.0, 22.8];

    let (rg, rs) = paired_returns(&gold, &silver);
    assert_eq!(rg.len(), 5);

    let corr = pearson(&rg, &rs).unwrap();
    assert!(corr > 0.9 && corr <= 1.0);

    assert_relative_eq!(mean(&rg).unwrap(), rg.iter().sum::<f64>() / 5.0, epsilon = 1e-12);
}
