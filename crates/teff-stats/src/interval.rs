//! Clopper-Pearson binomial confidence interval.
//!
//! The exact (conservative) binomial interval via Beta quantiles:
//! for `x` successes out of `n`,
//! - lower bound: `Beta(x, n-x+1)` quantile at `alpha/2` (0 when `x = 0`),
//! - upper bound: `Beta(x+1, n-x)` quantile at `1 - alpha/2` (1 when `x = n`).
//!
//! Reference: Clopper & Pearson (1934), "The use of confidence or fiducial
//! limits illustrated in the case of the binomial".

use statrs::distribution::{Beta, ContinuousCDF};
use teff_core::{Error, Result};

/// Default two-sided miscoverage, approximately a 1-sigma band.
pub const DEFAULT_ALPHA: f64 = 0.32;

/// Asymmetric errors `(rate - lower, upper - rate)` around `rate = x/n`.
///
/// `n = 0` is rejected; callers represent empty denominators explicitly
/// instead of dividing by zero.
pub fn binomial_interval(x: u64, n: u64, alpha: f64) -> Result<(f64, f64)> {
    if n == 0 {
        return Err(Error::Validation("binomial interval is undefined for n = 0".into()));
    }
    if x > n {
        return Err(Error::Validation(format!("x must be <= n, got x = {x}, n = {n}")));
    }
    if !(alpha.is_finite() && alpha > 0.0 && alpha < 1.0) {
        return Err(Error::Validation(format!("alpha must be in (0,1), got {alpha}")));
    }

    let xf = x as f64;
    let nf = n as f64;
    let rate = xf / nf;

    let lower = if x == 0 {
        0.0
    } else {
        beta_quantile(xf, nf - xf + 1.0, alpha / 2.0)?
    };
    let upper = if x == n {
        1.0
    } else {
        beta_quantile(xf + 1.0, nf - xf, 1.0 - alpha / 2.0)?
    };

    // The quantiles bracket x/n; clamp FP residue at the edges.
    Ok(((rate - lower).max(0.0), (upper - rate).max(0.0)))
}

fn beta_quantile(a: f64, b: f64, p: f64) -> Result<f64> {
    let dist = Beta::new(a, b)
        .map_err(|e| Error::Computation(format!("Beta({a}, {b}) construction failed: {e}")))?;
    Ok(dist.inverse_cdf(p))
}
