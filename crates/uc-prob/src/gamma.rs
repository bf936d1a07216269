//! Gamma distribution utilities.

use statrs::distribution::{ContinuousCDF, Gamma as StatGamma};
use statrs::function::gamma::{gamma_lr, ln_gamma};
use uc_core::{Error, Result};

fn check_shape_rate(shape: f64, rate: f64) -> Result<()> {
    if !shape.is_finite() || shape <= 0.0 {
        return Err(Error::Validation(format!("shape must be finite and > 0, got {}", shape)));
    }
    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::Validation(format!("rate must be finite and > 0, got {}", rate)));
    }
    Ok(())
}

/// Log-PDF of a Gamma distribution with `shape` and `rate` at `x`.
///
/// Parameterization:
/// - `shape > 0`
/// - `rate > 0` (inverse scale)
/// Support: `x >= 0`.
pub fn logpdf_shape_rate(x: f64, shape: f64, rate: f64) -> Result<f64> {
    check_shape_rate(shape, rate)?;
    if x < 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if x == 0.0 {
        if shape < 1.0 {
            return Ok(f64::INFINITY);
        }
        if shape > 1.0 {
            return Ok(f64::NEG_INFINITY);
        }
        // shape == 1 => exponential
        return Ok(rate.ln());
    }

    let ln_norm = shape * rate.ln() - ln_gamma(shape);
    Ok(ln_norm + (shape - 1.0) * x.ln() - rate * x)
}

/// CDF of Gamma(`shape`, `rate`) at `x`: the regularized lower incomplete
/// gamma `P(shape, rate * x)`.
pub fn cdf_shape_rate(x: f64, shape: f64, rate: f64) -> Result<f64> {
    check_shape_rate(shape, rate)?;
    if x <= 0.0 {
        return Ok(0.0);
    }
    Ok(gamma_lr(shape, rate * x))
}

/// Quantile of Gamma(`shape`, `rate`) at cumulative probability `u` in (0,1).
pub fn quantile_shape_rate(u: f64, shape: f64, rate: f64) -> Result<f64> {
    check_shape_rate(shape, rate)?;
    if !(0.0..=1.0).contains(&u) {
        return Err(Error::Validation(format!("u must be in [0,1], got {}", u)));
    }
    let dist = StatGamma::new(shape, rate)
        .map_err(|e| Error::Computation(format!("gamma({}, {}): {}", shape, rate, e)))?;
    Ok(dist.inverse_cdf(u))
}
