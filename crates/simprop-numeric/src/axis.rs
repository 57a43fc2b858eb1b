//! Sample axes.

use simprop_core::NumericError;

/// `n` points spaced uniformly in `ln x` from `min` to `max` inclusive.
///
/// # Errors
///
/// [`NumericError::InvalidArgument`] unless `0 < min < max` (both finite)
/// and `n >= 2`.
pub fn log_axis(min: f64, max: f64, n: usize) -> Result<Vec<f64>, NumericError> {
    if !(min > 0.0 && max > min && max.is_finite()) {
        return Err(NumericError::InvalidArgument {
            reason: format!("log axis needs 0 < min < max, got [{min}, {max}]"),
        });
    }
    if n < 2 {
        return Err(NumericError::InvalidArgument {
            reason: format!("log axis needs at least 2 points, got {n}"),
        });
    }
    let (l_min, l_max) = (min.ln(), max.ln());
    let step = (l_max - l_min) / (n - 1) as f64;
    let mut axis: Vec<f64> = (0..n).map(|i| (l_min + i as f64 * step).exp()).collect();
    // Pin the endpoints so they survive the exp/ln round trip bit-exactly.
    axis[0] = min;
    axis[n - 1] = max;
    Ok(axis)
}
