//! Beta prior with a closed-form Kumaraswamy fast path.

use uc_core::{broadcast_pair, Array, Dtype, Error, Prior, Result};
use uc_prob::beta as beta_fn;

use crate::expect_len;

/// Which quantile family the prior was constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Either concentration is exactly 1 everywhere: Beta coincides with
    /// Kumaraswamy, whose quantile is closed-form.
    Kumaraswamy,
    /// General incomplete-beta inversion.
    General,
}

/// Beta prior on (0, 1).
///
/// `concentration1` multiplies `ln x`, `concentration0` multiplies
/// `ln(1-x)` (the usual α/β). When every element of either parameter is
/// exactly 1 the prior switches to the Kumaraswamy closed forms, which
/// avoids the numerically delicate incomplete-beta inversion in the one
/// regime where it is unnecessary.
#[derive(Debug, Clone)]
pub struct Beta {
    alpha: Array,
    beta: Array,
    mode: Mode,
}

impl Beta {
    /// Construct from concentrations (each scalar or array; scalars
    /// broadcast).
    pub fn new(concentration1: Array, concentration0: Array) -> Result<Self> {
        let (alpha, beta) = broadcast_pair(&concentration1, &concentration0)?;
        for &c in alpha.as_f64()?.iter().chain(beta.as_f64()?) {
            if !c.is_finite() || c <= 0.0 {
                return Err(Error::Validation(format!(
                    "concentrations must be finite and > 0, got {}",
                    c
                )));
            }
        }
        let all_ones = |a: &Array| a.as_f64().map(|v| v.iter().all(|&c| c == 1.0));
        let mode = if all_ones(&beta)? || all_ones(&alpha)? {
            log::debug!("beta prior using closed-form kumaraswamy quantile");
            Mode::Kumaraswamy
        } else {
            Mode::General
        };
        Ok(Self { alpha, beta, mode })
    }
}

impl Prior for Beta {
    fn dtype(&self) -> Dtype {
        Dtype::F64
    }

    fn base_shape(&self) -> Vec<usize> {
        self.shape()
    }

    fn shape(&self) -> Vec<usize> {
        self.alpha.shape().to_vec()
    }

    fn forward(&self, u: &[f64]) -> Result<Array> {
        expect_len("beta forward", u.len(), self.base_size())?;
        let a = self.alpha.as_f64()?;
        let b = self.beta.as_f64()?;
        let mut out = Vec::with_capacity(u.len());
        for i in 0..u.len() {
            let x = match self.mode {
                Mode::Kumaraswamy => beta_fn::kumaraswamy_quantile(u[i], a[i], b[i])?,
                Mode::General => beta_fn::quantile(u[i], a[i], b[i])?,
            };
            out.push(x);
        }
        Array::from_f64(self.shape(), out)
    }

    fn inverse(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_f64()?;
        expect_len("beta inverse", xs.len(), self.size())?;
        let a = self.alpha.as_f64()?;
        let b = self.beta.as_f64()?;
        let mut out = Vec::with_capacity(xs.len());
        for i in 0..xs.len() {
            let u = match self.mode {
                Mode::Kumaraswamy => beta_fn::kumaraswamy_cdf(xs[i], a[i], b[i])?,
                Mode::General => beta_fn::cdf(xs[i], a[i], b[i])?,
            };
            out.push(u);
        }
        Ok(out)
    }

    fn log_prob(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_f64()?;
        expect_len("beta log_prob", xs.len(), self.size())?;
        let a = self.alpha.as_f64()?;
        let b = self.beta.as_f64()?;
        let mut out = Vec::with_capacity(xs.len());
        for i in 0..xs.len() {
            let lp = match self.mode {
                Mode::Kumaraswamy => beta_fn::kumaraswamy_logpdf(xs[i], a[i], b[i])?,
                Mode::General => beta_fn::logpdf(xs[i], a[i], b[i])?,
            };
            out.push(lp);
        }
        Ok(out)
    }
}
