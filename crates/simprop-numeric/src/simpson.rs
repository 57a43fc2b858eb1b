//! Composite Simpson quadrature.

use simprop_core::NumericError;

/// Validate the node count shared by [`integrate`] and [`simpson_weights`].
fn check_nodes(n: usize) -> Result<(), NumericError> {
    if n < 2 || n % 2 != 0 {
        return Err(NumericError::InvalidArgument {
            reason: format!("subinterval count must be even and >= 2, got {n}"),
        });
    }
    Ok(())
}

/// Composite Simpson approximation of `∫ₐᵇ f(x) dx` over `n` subintervals.
///
/// Exact for polynomials up to degree 3. `a == b` integrates to zero.
///
/// # Errors
///
/// [`NumericError::InvalidArgument`] if `n` is odd or below 2, if either
/// bound is non-finite, or if `a > b`.
///
/// # Examples
///
/// ```
/// use simprop_numeric::integrate;
/// let v = integrate(|x| x * x * x, 0.0, 1.0, 4).unwrap();
/// assert!((v - 0.25).abs() < 1e-15);
/// ```
pub fn integrate<F>(mut f: F, a: f64, b: f64, n: usize) -> Result<f64, NumericError>
where
    F: FnMut(f64) -> f64,
{
    check_nodes(n)?;
    if !a.is_finite() || !b.is_finite() {
        return Err(NumericError::InvalidArgument {
            reason: format!("bounds must be finite, got [{a}, {b}]"),
        });
    }
    if a > b {
        return Err(NumericError::InvalidArgument {
            reason: format!("lower bound {a} exceeds upper bound {b}"),
        });
    }

    let h = (b - a) / n as f64;
    let mut odd = 0.0;
    let mut even = 0.0;
    for i in 1..n {
        let x = a + i as f64 * h;
        if i % 2 == 1 {
            odd += f(x);
        } else {
            even += f(x);
        }
    }
    Ok(h / 3.0 * (f(a) + 4.0 * odd + 2.0 * even + f(b)))
}

/// Simpson coefficients `(1, 4, 2, 4, …, 4, 1) / 3` for `n` subintervals.
///
/// Multiply node `i` by `h · w[i]` to reproduce [`integrate`]; samplers use
/// the weights to turn an integrand on a grid into a discrete CDF.
///
/// # Errors
///
/// [`NumericError::InvalidArgument`] under the same node-count rules as
/// [`integrate`].
pub fn simpson_weights(n: usize) -> Result<Vec<f64>, NumericError> {
    check_nodes(n)?;
    Ok((0..=n)
        .map(|i| {
            if i == 0 || i == n {
                1.0 / 3.0
            } else if i % 2 == 1 {
                4.0 / 3.0
            } else {
                2.0 / 3.0
            }
        })
        .collect())
}
