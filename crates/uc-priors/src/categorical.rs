//! Categorical prior with two base-space parametrisations.

use uc_core::{Array, Dtype, Error, Prior, Result};
use uc_prob::categorical as cat_fn;
use uc_prob::math::searchsorted_left;

use crate::expect_len;

/// How the categorical draws are derived from uniforms.
///
/// `Cdf` preserves ordinal correlation between neighbouring categories
/// (nearby `u` map to nearby indices), which matters when the categories
/// are ordered. `GumbelMax` is cheaper and unbiased but the map from `u`
/// to index is discontinuous and has no closed-form inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parametrisation {
    /// One extra trailing uniform per category; argmax of logits plus
    /// Gumbel noise.
    GumbelMax,
    /// One uniform per sampled index; inverse-CDF lookup by sorted search.
    Cdf,
}

/// Categorical prior over `0..k`, batched over leading dimensions of the
/// logits.
#[derive(Debug, Clone)]
pub struct Categorical {
    logits: Array,
    mode: Parametrisation,
    k: usize,
    batch: Vec<usize>,
}

impl Categorical {
    /// Construct from unnormalized logits; the trailing axis indexes
    /// categories.
    pub fn from_logits(mode: Parametrisation, logits: Array) -> Result<Self> {
        let values = logits.as_f64()?;
        let shape = logits.shape();
        if shape.is_empty() {
            return Err(Error::Validation(
                "logits need a trailing category axis".to_string(),
            ));
        }
        let k = shape[shape.len() - 1];
        if k == 0 {
            return Err(Error::Validation("category count must be >= 1".to_string()));
        }
        if values.iter().any(|v| v.is_nan()) {
            return Err(Error::Validation("logits must not be NaN".to_string()));
        }
        for row in values.chunks(k) {
            if row.iter().all(|&l| l == f64::NEG_INFINITY) {
                return Err(Error::Validation(
                    "each batch row needs at least one category with mass".to_string(),
                ));
            }
        }
        let batch = shape[..shape.len() - 1].to_vec();
        Ok(Self { logits, mode, k, batch })
    }

    /// Construct from (possibly unnormalized) non-negative probabilities.
    pub fn from_probs(mode: Parametrisation, probs: Array) -> Result<Self> {
        let values = probs.as_f64()?;
        for &p in values {
            if !p.is_finite() || p < 0.0 {
                return Err(Error::Validation(format!(
                    "probs must be finite and >= 0, got {}",
                    p
                )));
            }
        }
        let logits: Vec<f64> = values.iter().map(|&p| p.ln()).collect();
        Self::from_logits(mode, Array::from_f64(probs.shape().to_vec(), logits)?)
    }

    /// Number of categories.
    pub fn num_categories(&self) -> usize {
        self.k
    }

    /// Active parametrisation.
    pub fn parametrisation(&self) -> Parametrisation {
        self.mode
    }

    fn batch_size(&self) -> usize {
        self.batch.iter().product()
    }

    fn logits_row(&self, row: usize) -> Result<&[f64]> {
        let values = self.logits.as_f64()?;
        Ok(&values[row * self.k..(row + 1) * self.k])
    }

    fn index_at(&self, x: &Array, row: usize) -> Result<usize> {
        let xi = x.as_i64()?[row];
        if xi < 0 || xi as usize >= self.k {
            return Err(Error::Validation(format!(
                "category {} out of range for {} categories",
                xi, self.k
            )));
        }
        Ok(xi as usize)
    }
}

impl Prior for Categorical {
    fn dtype(&self) -> Dtype {
        Dtype::I64
    }

    fn base_shape(&self) -> Vec<usize> {
        match self.mode {
            Parametrisation::GumbelMax => {
                let mut s = self.batch.clone();
                s.push(self.k);
                s
            }
            Parametrisation::Cdf => self.batch.clone(),
        }
    }

    fn shape(&self) -> Vec<usize> {
        self.batch.clone()
    }

    fn forward(&self, u: &[f64]) -> Result<Array> {
        expect_len("categorical forward", u.len(), self.base_size())?;
        let mut out = Vec::with_capacity(self.batch_size());
        match self.mode {
            Parametrisation::GumbelMax => {
                for row in 0..self.batch_size() {
                    let logits = self.logits_row(row)?;
                    let noise = &u[row * self.k..(row + 1) * self.k];
                    let mut best = 0usize;
                    let mut best_score = f64::NEG_INFINITY;
                    for (j, (&l, &uj)) in logits.iter().zip(noise).enumerate() {
                        let gumbel = -(-uj.ln()).ln();
                        let score = l + gumbel;
                        if score > best_score {
                            best_score = score;
                            best = j;
                        }
                    }
                    out.push(best as i64);
                }
            }
            Parametrisation::Cdf => {
                for row in 0..self.batch_size() {
                    let cum = cat_fn::cumulative_log_probs(self.logits_row(row)?)?;
                    let idx = searchsorted_left(&cum, u[row].ln());
                    // cum ends at exactly 0 and ln(u) < 0 for u in (0,1).
                    out.push(idx.min(self.k - 1) as i64);
                }
            }
        }
        Array::from_i64(self.shape(), out)
    }

    fn inverse(&self, x: &Array) -> Result<Vec<f64>> {
        match self.mode {
            Parametrisation::GumbelMax => Err(Error::NotImplemented(
                "gumbel-max categorical has no closed-form inverse".to_string(),
            )),
            Parametrisation::Cdf => {
                expect_len("categorical inverse", x.size(), self.size())?;
                let mut out = Vec::with_capacity(self.batch_size());
                for row in 0..self.batch_size() {
                    let idx = self.index_at(x, row)?;
                    out.push(cat_fn::cdf(idx, self.logits_row(row)?)?);
                }
                Ok(out)
            }
        }
    }

    fn log_prob(&self, x: &Array) -> Result<Vec<f64>> {
        expect_len("categorical log_prob", x.size(), self.size())?;
        let mut out = Vec::with_capacity(self.batch_size());
        for row in 0..self.batch_size() {
            let idx = self.index_at(x, row)?;
            out.push(cat_fn::logpmf(idx, self.logits_row(row)?)?);
        }
        Ok(out)
    }
}
