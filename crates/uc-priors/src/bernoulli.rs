//! Bernoulli prior: one uniform per element, thresholded against `p`.

use uc_core::{Array, Dtype, Error, Prior, Result};
use uc_prob::bernoulli::logpmf_logit;
use uc_prob::math::sigmoid;

use crate::expect_len;

/// Bernoulli prior over booleans.
///
/// `forward` is the threshold test `u < p`; `inverse` is the CDF.
#[derive(Debug, Clone)]
pub struct Bernoulli {
    probs: Array,
    logits: Vec<f64>,
}

impl Bernoulli {
    /// Construct from success probabilities (scalar or array).
    pub fn from_probs(probs: Array) -> Result<Self> {
        let p = probs.as_f64()?;
        for &pi in p {
            if !pi.is_finite() || !(0.0..=1.0).contains(&pi) {
                return Err(Error::Validation(format!(
                    "probs must be finite and in [0,1], got {}",
                    pi
                )));
            }
        }
        let logits = p.iter().map(|&pi| pi.ln() - (1.0 - pi).ln()).collect();
        Ok(Self { probs, logits })
    }

    /// Construct from log-odds (scalar or array).
    pub fn from_logits(logits: Array) -> Result<Self> {
        let eta = logits.as_f64()?;
        for &e in eta {
            if e.is_nan() {
                return Err(Error::Validation("logits must not be NaN".to_string()));
            }
        }
        let p: Vec<f64> = eta.iter().map(|&e| sigmoid(e)).collect();
        let shape = logits.shape().to_vec();
        Ok(Self { probs: Array::from_f64(shape, p)?, logits: eta.to_vec() })
    }
}

impl Prior for Bernoulli {
    fn dtype(&self) -> Dtype {
        Dtype::Bool
    }

    fn base_shape(&self) -> Vec<usize> {
        self.shape()
    }

    fn shape(&self) -> Vec<usize> {
        self.probs.shape().to_vec()
    }

    fn forward(&self, u: &[f64]) -> Result<Array> {
        expect_len("bernoulli forward", u.len(), self.base_size())?;
        let p = self.probs.as_f64()?;
        let out = u.iter().zip(p).map(|(&ui, &pi)| ui < pi).collect();
        Array::from_bool(self.shape(), out)
    }

    fn inverse(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_bool()?;
        expect_len("bernoulli inverse", xs.len(), self.size())?;
        let p = self.probs.as_f64()?;
        Ok(xs.iter().zip(p).map(|(&xi, &pi)| if xi { 1.0 } else { 1.0 - pi }).collect())
    }

    fn log_prob(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_bool()?;
        expect_len("bernoulli log_prob", xs.len(), self.size())?;
        Ok(xs.iter().zip(&self.logits).map(|(&xi, &eta)| logpmf_logit(xi, eta)).collect())
    }
}
