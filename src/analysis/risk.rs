use ndarray::Array1;

/// Sharpe ratio: mean excess return over its population standard deviation.
///
/// A zero-variance excess series divides by zero and yields NaN or infinity;
/// that is propagated as-is rather than raised. The empty input is NaN.
pub fn sharpe_ratio(returns: &[f64], risk_free: f64) -> f64 {
    let excess = Array1::from_iter(returns.iter().map(|r| r - risk_free));
    match excess.mean() {
        Some(mean) => mean / excess.std(0.0),
        None => f64::NAN,
    }
}
