//! Core traits for unitcube
//!
//! The sampler treats every prior uniformly through the [`Prior`] trait:
//! it draws points in a unit hypercube, pushes them through `forward` to
//! get model-space values, and scores model-space values with `log_prob`.
//! Concrete distributions live in `uc-priors`; nothing here depends on a
//! particular family.

use crate::types::{numel, Array, Dtype};
use crate::Result;

/// A named, typed, shaped transformation between a base representation
/// (independent Uniform(0,1) coordinates) and a model-space value.
///
/// Shapes are fixed at construction and never change. `base_shape` may
/// differ from `shape` when the parametrisation needs more (or fewer)
/// uniforms than it produces values; a gumbel-max categorical draws one
/// uniform per category.
///
/// # Preconditions
///
/// `log_prob` and `inverse` perform **no support checking**: calling them
/// with values outside the distribution's support yields mathematically
/// undefined results rather than an error. Checking supports on every
/// vectorized call would dominate the hot sampling path, so the burden is
/// on callers.
pub trait Prior: Send + Sync {
    /// Element type of sampled values.
    fn dtype(&self) -> Dtype;

    /// Shape of the underlying independent-uniform representation.
    fn base_shape(&self) -> Vec<usize>;

    /// Shape of values in model space.
    fn shape(&self) -> Vec<usize>;

    /// Quantile (inverse-CDF) transform.
    ///
    /// `u` is a flattened point of shape `base_shape` with entries in
    /// (0,1). Returns the model-space value whose (possibly joint) CDF
    /// equals `u`.
    fn forward(&self, u: &[f64]) -> Result<Array>;

    /// Cumulative probability of a model-space value, in base
    /// representation.
    ///
    /// Fails with [`crate::Error::NotImplemented`] when the active
    /// parametrisation has no closed-form inverse.
    fn inverse(&self, x: &Array) -> Result<Vec<f64>>;

    /// Log-density (or log-mass) at a model-space value, one entry per
    /// batch element with event dimensions reduced.
    fn log_prob(&self, x: &Array) -> Result<Vec<f64>>;

    /// Number of unit-cube coordinates this prior consumes.
    fn base_size(&self) -> usize {
        numel(&self.base_shape())
    }

    /// Number of model-space elements this prior produces.
    fn size(&self) -> usize {
        numel(&self.shape())
    }
}
