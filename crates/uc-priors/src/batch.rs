//! Rayon-parallel mapping of prior transforms over point batches.
//!
//! Every transform in the catalog is pure and stateless, so batch
//! elements carry no sequential dependencies; a live-point population can
//! be pushed through `forward`/`log_prob` in parallel.

use rayon::prelude::*;
use uc_core::{Array, Prior, Result};

/// Map `forward` over a batch of base points in parallel.
pub fn forward_batch(prior: &dyn Prior, us: &[Vec<f64>]) -> Result<Vec<Array>> {
    us.par_iter().map(|u| prior.forward(u)).collect()
}

/// Map `log_prob` over a batch of model-space values in parallel.
pub fn log_prob_batch(prior: &dyn Prior, xs: &[Array]) -> Result<Vec<Vec<f64>>> {
    xs.par_iter().map(|x| prior.log_prob(x)).collect()
}
