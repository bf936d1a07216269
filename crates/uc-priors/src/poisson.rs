//! Poisson prior: integer counts via fixed-depth bisection.

use uc_core::{Array, Dtype, Error, Prior, Result};
use uc_prob::poisson as poisson_fn;

use crate::expect_len;

/// Poisson prior over counts.
///
/// `forward` inverts the smooth CDF relaxation per element with a
/// fixed-depth bisection ([`uc_prob::poisson::quantile_bisect`]) and
/// truncates to an integer. Elements are independent, so batched rates
/// vectorize trivially.
#[derive(Debug, Clone)]
pub struct Poisson {
    rate: Array,
}

impl Poisson {
    /// Construct from rates (scalar or array).
    pub fn from_rate(rate: Array) -> Result<Self> {
        for &r in rate.as_f64()? {
            if !r.is_finite() || r < 0.0 {
                return Err(Error::Validation(format!(
                    "rate must be finite and >= 0, got {}",
                    r
                )));
            }
        }
        Ok(Self { rate })
    }

    /// Construct from log-rates (scalar or array).
    pub fn from_log_rate(log_rate: Array) -> Result<Self> {
        let rates: Vec<f64> = log_rate.as_f64()?.iter().map(|&lr| lr.exp()).collect();
        Self::from_rate(Array::from_f64(log_rate.shape().to_vec(), rates)?)
    }
}

impl Prior for Poisson {
    fn dtype(&self) -> Dtype {
        Dtype::I64
    }

    fn base_shape(&self) -> Vec<usize> {
        self.shape()
    }

    fn shape(&self) -> Vec<usize> {
        self.rate.shape().to_vec()
    }

    fn forward(&self, u: &[f64]) -> Result<Array> {
        expect_len("poisson forward", u.len(), self.base_size())?;
        let rates = self.rate.as_f64()?;
        let mut out = Vec::with_capacity(u.len());
        for (&ui, &r) in u.iter().zip(rates) {
            let q = poisson_fn::quantile_bisect(ui, r)?;
            out.push(q.trunc() as i64);
        }
        Array::from_i64(self.shape(), out)
    }

    fn inverse(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_i64()?;
        expect_len("poisson inverse", xs.len(), self.size())?;
        let rates = self.rate.as_f64()?;
        Ok(xs
            .iter()
            .zip(rates)
            .map(|(&xi, &r)| {
                if xi < 0 {
                    0.0
                } else {
                    poisson_fn::smooth_cdf(xi as f64, r.max(1e-5))
                }
            })
            .collect())
    }

    fn log_prob(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_i64()?;
        expect_len("poisson log_prob", xs.len(), self.size())?;
        let rates = self.rate.as_f64()?;
        let mut out = Vec::with_capacity(xs.len());
        for (&xi, &r) in xs.iter().zip(rates) {
            if xi < 0 {
                out.push(f64::NEG_INFINITY);
            } else {
                out.push(poisson_fn::logpmf(xi as u64, r)?);
            }
        }
        Ok(out)
    }
}
