//! Fixed-size log-uniform lookup tables.

use simprop_core::NumericError;

/// A table of `N` samples spaced uniformly in `ln x` over `[min, max]`.
///
/// Queries interpolate linearly in `ln x` between neighbouring samples and
/// return zero outside the tabulated range.
#[derive(Clone, Debug, PartialEq)]
pub struct LookupTable<const N: usize> {
    ln_min: f64,
    ln_step: f64,
    min: f64,
    max: f64,
    values: Vec<f64>,
}

impl<const N: usize> LookupTable<N> {
    /// Tabulate `f` at `N` log-spaced points in `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`NumericError::InvalidArgument`] for an invalid range, `N < 2`, or
    /// a non-finite sample.
    pub fn from_fn<F>(min: f64, max: f64, f: F) -> Result<Self, NumericError>
    where
        F: FnMut(f64) -> f64,
    {
        let values: Vec<f64> = crate::log_axis(min, max, N)?.into_iter().map(f).collect();
        Self::from_samples(min, max, &values)
    }

    /// Build a table from `N` samples already evaluated on the log axis.
    ///
    /// # Errors
    ///
    /// [`NumericError::InvalidArgument`] if `samples.len() != N`, the range
    /// is invalid, or any sample is non-finite.
    pub fn from_samples(min: f64, max: f64, samples: &[f64]) -> Result<Self, NumericError> {
        if N < 2 {
            return Err(NumericError::InvalidArgument {
                reason: format!("lookup table needs at least 2 samples, got {N}"),
            });
        }
        if !(min > 0.0 && max > min && max.is_finite()) {
            return Err(NumericError::InvalidArgument {
                reason: format!("lookup table needs 0 < min < max, got [{min}, {max}]"),
            });
        }
        if samples.len() != N {
            return Err(NumericError::InvalidArgument {
                reason: format!("expected {N} samples, got {}", samples.len()),
            });
        }
        if let Some(i) = samples.iter().position(|v| !v.is_finite()) {
            return Err(NumericError::InvalidArgument {
                reason: format!("sample {i} is not finite: {}", samples[i]),
            });
        }
        let ln_min = min.ln();
        Ok(Self {
            ln_min,
            ln_step: (max.ln() - ln_min) / (N - 1) as f64,
            min,
            max,
            values: samples.to_vec(),
        })
    }

    /// Interpolated value at `x`, or zero outside `[min, max]`.
    pub fn get(&self, x: f64) -> f64 {
        if !(x >= self.min && x <= self.max) {
            return 0.0;
        }
        let t = (x.ln() - self.ln_min) / self.ln_step;
        let i = (t.floor() as usize).min(N - 2);
        let frac = (t - i as f64).clamp(0.0, 1.0);
        self.values[i] + frac * (self.values[i + 1] - self.values[i])
    }

    /// Lower edge of the tabulated range.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper edge of the tabulated range.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Raw samples in axis order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
