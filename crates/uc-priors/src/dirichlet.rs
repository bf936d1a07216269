//! Unnormalised Dirichlet prior via independent Gamma components.

use uc_core::{Array, Dtype, Error, Prior, Result};
use uc_prob::gamma as gamma_fn;

use crate::expect_len;

/// Unnormalised Dirichlet over `K` classes.
///
/// Components are independent Gamma(concentration, rate=1) draws; dividing
/// a sample by its sum yields a standard Dirichlet sample:
///
/// `X ~ UnnormalisedDirichlet(alpha)`, `Y = X / sum(X)` ⇒ `Y ~ Dirichlet(alpha)`.
///
/// Keeping the sample unnormalised keeps the transform elementwise and
/// invertible, which the simplex-valued version is not.
#[derive(Debug, Clone)]
pub struct UnnormalisedDirichlet {
    concentration: Array,
    k: usize,
}

impl UnnormalisedDirichlet {
    /// Construct from concentrations; the trailing axis indexes classes.
    pub fn new(concentration: Array) -> Result<Self> {
        let values = concentration.as_f64()?;
        let shape = concentration.shape();
        if shape.is_empty() {
            return Err(Error::Validation(
                "concentration needs a trailing class axis".to_string(),
            ));
        }
        let k = shape[shape.len() - 1];
        if k == 0 {
            return Err(Error::Validation("class count must be >= 1".to_string()));
        }
        for &c in values {
            if !c.is_finite() || c <= 0.0 {
                return Err(Error::Validation(format!(
                    "concentrations must be finite and > 0, got {}",
                    c
                )));
            }
        }
        Ok(Self { concentration, k })
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.k
    }
}

impl Prior for UnnormalisedDirichlet {
    fn dtype(&self) -> Dtype {
        Dtype::F64
    }

    fn base_shape(&self) -> Vec<usize> {
        self.shape()
    }

    fn shape(&self) -> Vec<usize> {
        self.concentration.shape().to_vec()
    }

    fn forward(&self, u: &[f64]) -> Result<Array> {
        expect_len("dirichlet forward", u.len(), self.base_size())?;
        let conc = self.concentration.as_f64()?;
        let mut out = Vec::with_capacity(u.len());
        for (&ui, &c) in u.iter().zip(conc) {
            out.push(gamma_fn::quantile_shape_rate(ui, c, 1.0)?);
        }
        Array::from_f64(self.shape(), out)
    }

    fn inverse(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_f64()?;
        expect_len("dirichlet inverse", xs.len(), self.size())?;
        let conc = self.concentration.as_f64()?;
        let mut out = Vec::with_capacity(xs.len());
        for (&xi, &c) in xs.iter().zip(conc) {
            out.push(gamma_fn::cdf_shape_rate(xi, c, 1.0)?);
        }
        Ok(out)
    }

    fn log_prob(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_f64()?;
        expect_len("dirichlet log_prob", xs.len(), self.size())?;
        let conc = self.concentration.as_f64()?;
        let rows = xs.len() / self.k;
        let mut out = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut acc = 0.0;
            for j in 0..self.k {
                let i = row * self.k + j;
                acc += gamma_fn::logpdf_shape_rate(xs[i], conc[i], 1.0)?;
            }
            out.push(acc);
        }
        Ok(out)
    }
}
