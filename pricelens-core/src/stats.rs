//! Sample statistics shared by the volatility engine and the risk summary.
//!
//! Both functions skip undefined (NaN) entries, matching how the derived
//! series mark warm-up values.

/// Mean of the defined values, `None` if there are none.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

/// Sample standard deviation (N-1 denominator) of the defined values.
///
/// `None` with fewer than two defined values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    let defined: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if defined.len() < 2 {
        return None;
    }
    let m = defined.iter().sum::<f64>() / defined.len() as f64;
    let variance =
        defined.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (defined.len() - 1) as f64;
    Some(variance.sqrt())
}
