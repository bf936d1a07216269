//! Beta distribution utilities, plus the Kumaraswamy closed forms.
//!
//! The Kumaraswamy distribution coincides with Beta whenever either
//! concentration equals 1, and its quantile is closed-form. The prior
//! layer uses it to sidestep the incomplete-beta inversion in that regime.

use statrs::distribution::{Beta as StatBeta, ContinuousCDF};
use statrs::function::beta::beta_reg;
use statrs::function::gamma::ln_gamma;
use uc_core::{Error, Result};

#[inline]
fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

fn check_concentrations(a: f64, b: f64) -> Result<()> {
    if !a.is_finite() || a <= 0.0 {
        return Err(Error::Validation(format!("a must be finite and > 0, got {}", a)));
    }
    if !b.is_finite() || b <= 0.0 {
        return Err(Error::Validation(format!("b must be finite and > 0, got {}", b)));
    }
    Ok(())
}

/// Log-PDF of a Beta(`a`, `b`) distribution at `x`.
///
/// `a` multiplies `ln x`, `b` multiplies `ln(1-x)`. Support: `0 <= x <= 1`.
pub fn logpdf(x: f64, a: f64, b: f64) -> Result<f64> {
    check_concentrations(a, b)?;
    if !(0.0..=1.0).contains(&x) {
        return Ok(f64::NEG_INFINITY);
    }

    let ln_norm = -ln_beta(a, b);
    if x == 0.0 {
        if a < 1.0 {
            return Ok(f64::INFINITY);
        }
        if a > 1.0 {
            return Ok(f64::NEG_INFINITY);
        }
        return Ok(ln_norm);
    }
    if x == 1.0 {
        if b < 1.0 {
            return Ok(f64::INFINITY);
        }
        if b > 1.0 {
            return Ok(f64::NEG_INFINITY);
        }
        return Ok(ln_norm);
    }

    Ok(ln_norm + (a - 1.0) * x.ln() + (b - 1.0) * (1.0 - x).ln())
}

/// CDF of Beta(`a`, `b`) at `x`: the regularized incomplete beta `I_x(a, b)`.
pub fn cdf(x: f64, a: f64, b: f64) -> Result<f64> {
    check_concentrations(a, b)?;
    if x <= 0.0 {
        return Ok(0.0);
    }
    if x >= 1.0 {
        return Ok(1.0);
    }
    Ok(beta_reg(a, b, x))
}

/// Quantile of Beta(`a`, `b`) at cumulative probability `u` in (0,1).
pub fn quantile(u: f64, a: f64, b: f64) -> Result<f64> {
    check_concentrations(a, b)?;
    if !(0.0..=1.0).contains(&u) {
        return Err(Error::Validation(format!("u must be in [0,1], got {}", u)));
    }
    let dist = StatBeta::new(a, b)
        .map_err(|e| Error::Computation(format!("beta({}, {}): {}", a, b, e)))?;
    Ok(dist.inverse_cdf(u))
}

/// Log-PDF of Kumaraswamy(`a`, `b`) at `x` in (0,1).
pub fn kumaraswamy_logpdf(x: f64, a: f64, b: f64) -> Result<f64> {
    check_concentrations(a, b)?;
    if !(0.0..=1.0).contains(&x) {
        return Ok(f64::NEG_INFINITY);
    }
    if x == 0.0 {
        if a < 1.0 {
            return Ok(f64::INFINITY);
        }
        if a > 1.0 {
            return Ok(f64::NEG_INFINITY);
        }
        // a == 1: pdf is b*(1-x)^{b-1}
        return Ok(b.ln());
    }
    if x == 1.0 {
        if b < 1.0 {
            return Ok(f64::INFINITY);
        }
        if b > 1.0 {
            return Ok(f64::NEG_INFINITY);
        }
        // b == 1: pdf is a*x^{a-1}
        return Ok(a.ln());
    }
    let xa = x.powf(a);
    Ok(a.ln() + b.ln() + (a - 1.0) * x.ln() + (b - 1.0) * (-xa).ln_1p())
}

/// CDF of Kumaraswamy(`a`, `b`): `1 - (1 - x^a)^b`.
pub fn kumaraswamy_cdf(x: f64, a: f64, b: f64) -> Result<f64> {
    check_concentrations(a, b)?;
    if x <= 0.0 {
        return Ok(0.0);
    }
    if x >= 1.0 {
        return Ok(1.0);
    }
    Ok(1.0 - (1.0 - x.powf(a)).powf(b))
}

/// Quantile of Kumaraswamy(`a`, `b`): `(1 - (1-u)^{1/b})^{1/a}`.
///
/// Closed form, no iteration. Coincides with the Beta quantile whenever
/// `a == 1` or `b == 1`.
pub fn kumaraswamy_quantile(u: f64, a: f64, b: f64) -> Result<f64> {
    check_concentrations(a, b)?;
    Ok((1.0 - (1.0 - u).powf(1.0 / b)).powf(1.0 / a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_logpdf() {
        for x in [0.0, 0.2, 0.5, 0.9, 1.0] {
            assert_relative_eq!(logpdf(x, 1.0, 1.0).unwrap(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_out_of_support() {
        let lp = logpdf(-0.1, 2.0, 3.0).unwrap();
        assert!(lp.is_infinite() && lp.is_sign_negative());
    }

    #[test]
    fn test_invalid_params() {
        assert!(logpdf(0.5, 0.0, 1.0).is_err());
        assert!(cdf(0.5, 1.0, 0.0).is_err());
        assert!(quantile(0.5, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_quantile_inverts_cdf() {
        for &(a, b) in &[(2.0, 3.0), (0.5, 0.5), (5.0, 1.5)] {
            for &u in &[0.05, 0.3, 0.5, 0.7, 0.95] {
                let x = quantile(u, a, b).unwrap();
                assert_relative_eq!(cdf(x, a, b).unwrap(), u, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_kumaraswamy_matches_beta_when_a_is_one() {
        // Beta(1, b) cdf is 1 - (1-x)^b, exactly Kumaraswamy(1, b).
        for &b in &[0.5, 1.0, 2.5, 7.0] {
            for &u in &[0.1, 0.4, 0.9] {
                let xk = kumaraswamy_quantile(u, 1.0, b).unwrap();
                let expected = 1.0 - (1.0 - u).powf(1.0 / b);
                assert_relative_eq!(xk, expected, epsilon = 1e-15);
                assert_relative_eq!(cdf(xk, 1.0, b).unwrap(), u, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_kumaraswamy_matches_beta_when_b_is_one() {
        // Beta(a, 1) cdf is x^a, exactly Kumaraswamy(a, 1).
        for &a in &[0.5, 2.0, 4.0] {
            for &u in &[0.1, 0.5, 0.99] {
                let xk = kumaraswamy_quantile(u, a, 1.0).unwrap();
                assert_relative_eq!(xk, u.powf(1.0 / a), epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_kumaraswamy_quantile_inverts_cdf() {
        for &(a, b) in &[(2.0, 3.0), (0.7, 1.2), (1.0, 5.0)] {
            for &u in &[0.01, 0.25, 0.5, 0.75, 0.99] {
                let x = kumaraswamy_quantile(u, a, b).unwrap();
                assert_relative_eq!(kumaraswamy_cdf(x, a, b).unwrap(), u, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_kumaraswamy_logpdf_matches_beta_in_overlap() {
        // When b == 1 both families reduce to pdf = a x^{a-1}.
        for &a in &[0.5, 2.0, 3.5] {
            for &x in &[0.2, 0.5, 0.8] {
                assert_relative_eq!(
                    kumaraswamy_logpdf(x, a, 1.0).unwrap(),
                    logpdf(x, a, 1.0).unwrap(),
                    epsilon = 1e-10
                );
            }
        }
    }
}
