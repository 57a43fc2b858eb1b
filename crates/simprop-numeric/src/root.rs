//! Bounded bisection root finder for monotone one-dimensional equations.

use simprop_core::NumericError;

/// Locate `x* ∈ [lo, hi]` with `f(x*) ≈ 0` by bisection.
///
/// Requires `f(lo)` and `f(hi)` to bracket a sign change. The bracket is
/// halved until its width drops below `tol`; the midpoint of the final
/// bracket is returned. An endpoint at which `f` vanishes exactly is
/// returned as-is.
///
/// # Errors
///
/// - [`NumericError::InvalidArgument`] for non-finite or reversed bounds,
///   or a non-positive tolerance.
/// - [`NumericError::NoConvergence`] if there is no sign change, if `f`
///   returns a non-finite value, or if `max_iter` halvings do not shrink
///   the bracket below `tol`.
///
/// # Examples
///
/// ```
/// use simprop_numeric::find_root;
/// let x = find_root(|x| x - 0.5, 0.0, 1.0, 100, 1e-9).unwrap();
/// assert!((x - 0.5).abs() < 1e-9);
/// ```
pub fn find_root<F>(mut f: F, lo: f64, hi: f64, max_iter: u32, tol: f64) -> Result<f64, NumericError>
where
    F: FnMut(f64) -> f64,
{
    try_find_root(|x| Ok::<_, NumericError>(f(x)), lo, hi, max_iter, tol)
}

/// [`find_root`] for a fallible function.
///
/// The first error returned by `f` aborts the search and is propagated
/// unchanged; solver failures are converted into `E`.
pub fn try_find_root<F, E>(
    f: F,
    lo: f64,
    hi: f64,
    max_iter: u32,
    tol: f64,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<NumericError>,
{
    try_bracket_root(f, lo, hi, max_iter, tol).map(|b| b.midpoint())
}

/// Final bracket of a bisection search, with `f` at both ends.
///
/// `f_lo` and `f_hi` have opposite signs unless the search hit an exact
/// zero, in which case both ends collapse onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket {
    /// Lower end.
    pub lo: f64,
    /// Upper end.
    pub hi: f64,
    /// `f(lo)`.
    pub f_lo: f64,
    /// `f(hi)`.
    pub f_hi: f64,
}

impl Bracket {
    fn exact(x: f64) -> Self {
        Self {
            lo: x,
            hi: x,
            f_lo: 0.0,
            f_hi: 0.0,
        }
    }

    /// Midpoint of the bracket.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    /// The end at which `f ≤ 0`.
    pub fn non_positive_end(&self) -> f64 {
        if self.f_lo <= 0.0 {
            self.lo
        } else {
            self.hi
        }
    }
}

/// Bisection that returns the final [`Bracket`] instead of its midpoint.
///
/// Same arguments and errors as [`try_find_root`]. Use it when the caller
/// needs a point on a known side of the root.
pub fn try_bracket_root<F, E>(
    mut f: F,
    lo: f64,
    hi: f64,
    max_iter: u32,
    tol: f64,
) -> Result<Bracket, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<NumericError>,
{
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(NumericError::InvalidArgument {
            reason: format!("invalid bracket [{lo}, {hi}]"),
        }
        .into());
    }
    if !(tol > 0.0 && tol.is_finite()) {
        return Err(NumericError::InvalidArgument {
            reason: format!("tolerance must be finite and > 0, got {tol}"),
        }
        .into());
    }

    let mut lo = lo;
    let mut hi = hi;
    let mut f_lo = evaluate(&mut f, lo, 0)?;
    if f_lo == 0.0 {
        return Ok(Bracket::exact(lo));
    }
    let mut f_hi = evaluate(&mut f, hi, 0)?;
    if f_hi == 0.0 {
        return Ok(Bracket::exact(hi));
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(NumericError::NoConvergence {
            iterations: 0,
            reason: format!("no sign change on [{lo}, {hi}]: f(lo)={f_lo}, f(hi)={f_hi}"),
        }
        .into());
    }

    let mut iterations = 0;
    while hi - lo >= tol {
        if iterations == max_iter {
            return Err(NumericError::NoConvergence {
                iterations,
                reason: format!("bracket [{lo}, {hi}] still wider than {tol}"),
            }
            .into());
        }
        let mid = 0.5 * (lo + hi);
        let f_mid = evaluate(&mut f, mid, iterations)?;
        iterations += 1;
        if f_mid == 0.0 {
            return Ok(Bracket::exact(mid));
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
            f_hi = f_mid;
        }
    }
    Ok(Bracket { lo, hi, f_lo, f_hi })
}

fn evaluate<F, E>(f: &mut F, x: f64, iterations: u32) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<NumericError>,
{
    let v = f(x)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NumericError::NoConvergence {
            iterations,
            reason: format!("non-finite evaluation f({x}) = {v}"),
        }
        .into())
    }
}
