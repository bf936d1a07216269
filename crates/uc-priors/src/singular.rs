//! Point-estimate wrapper turning a prior into a pinned parameter.

use rand::distributions::Open01;
use rand::Rng;
use uc_core::{Array, Dtype, Error, Prior, Result};

/// A prior pinned at a single base point.
///
/// Converts a prior into a non-Bayesian parameter that takes one value in
/// the model but keeps the wrapped prior's log-density contract, so the
/// value can still be scored. The pinned point is either the median of
/// the distribution (`u = 0.5` in every base coordinate) or a random
/// draw.
pub struct SingularPrior {
    inner: Box<dyn Prior>,
    base: Vec<f64>,
    value: Array,
}

impl SingularPrior {
    /// Pin `prior` at its median.
    pub fn median<P: Prior + 'static>(prior: P) -> Result<Self> {
        let base = vec![0.5; prior.base_size()];
        Self::at_base(Box::new(prior), base)
    }

    /// Pin `prior` at a random base point drawn from `rng`.
    pub fn random<P: Prior + 'static, R: Rng + ?Sized>(prior: P, rng: &mut R) -> Result<Self> {
        let base = (0..prior.base_size()).map(|_| rng.sample::<f64, _>(Open01)).collect();
        Self::at_base(Box::new(prior), base)
    }

    fn at_base(inner: Box<dyn Prior>, base: Vec<f64>) -> Result<Self> {
        let value = inner.forward(&base)?;
        Ok(Self { inner, base, value })
    }

    /// The pinned model-space value.
    pub fn value(&self) -> &Array {
        &self.value
    }

    /// The pinned base point.
    pub fn base(&self) -> &[f64] {
        &self.base
    }
}

impl Prior for SingularPrior {
    fn dtype(&self) -> Dtype {
        self.inner.dtype()
    }

    /// A pinned parameter consumes no unit-cube coordinates.
    fn base_shape(&self) -> Vec<usize> {
        vec![0]
    }

    fn shape(&self) -> Vec<usize> {
        self.inner.shape()
    }

    fn forward(&self, _u: &[f64]) -> Result<Array> {
        Ok(self.value.clone())
    }

    fn inverse(&self, _x: &Array) -> Result<Vec<f64>> {
        Err(Error::NotImplemented(
            "a pinned parameter has no base representation".to_string(),
        ))
    }

    fn log_prob(&self, x: &Array) -> Result<Vec<f64>> {
        self.inner.log_prob(x)
    }
}

/// Conversion from any prior into its point-estimated variant.
pub trait PriorExt: Prior + Sized + 'static {
    /// Wrap into a [`SingularPrior`], randomly initialized when
    /// `random_init` is set, otherwise pinned at the median.
    fn parametrised<R: Rng + ?Sized>(self, random_init: bool, rng: &mut R) -> Result<SingularPrior> {
        if random_init {
            SingularPrior::random(self, rng)
        } else {
            SingularPrior::median(self)
        }
    }
}

impl<P: Prior + Sized + 'static> PriorExt for P {}
