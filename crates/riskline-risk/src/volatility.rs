//! Return volatility.
//!
//! Volatility is the POPULATION standard deviation of the period returns:
//! the sum of squared deviations is divided by `n`, not `n - 1`. This differs
//! from the sample convention and is what downstream consumers expect.

/// Population standard deviation. `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;

    // Exact zero for a flat series; the two-pass mean can leave rounding residue.
    if values.iter().all(|&v| v == first) {
        return Some(0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(variance.sqrt())
}
