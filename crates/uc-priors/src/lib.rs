//! Special priors for unitcube.
//!
//! Each prior here is a concrete transformation between unit-hypercube
//! coordinates and model space, implementing [`uc_core::Prior`]. The
//! catalog covers the distributions a nested sampler cannot express as a
//! plain elementwise quantile: threshold tests (Bernoulli), closed-form
//! fast paths (Beta/Kumaraswamy), dual parametrisations (Categorical),
//! order statistics (ForcedIdentifiability), iterative inversion
//! (Poisson), and simplex-free Dirichlet sampling (UnnormalisedDirichlet).
//!
//! Support checking is deliberately absent from `log_prob`/`inverse`; see
//! the [`uc_core::Prior`] contract.

pub mod batch;
pub mod bernoulli;
pub mod beta;
pub mod categorical;
pub mod dirichlet;
pub mod forced_identifiability;
pub mod poisson;
pub mod singular;

pub use batch::{forward_batch, log_prob_batch};
pub use bernoulli::Bernoulli;
pub use beta::Beta;
pub use categorical::{Categorical, Parametrisation};
pub use dirichlet::UnnormalisedDirichlet;
pub use forced_identifiability::ForcedIdentifiability;
pub use poisson::Poisson;
pub use singular::{PriorExt, SingularPrior};

use uc_core::{Error, Result};

/// Length check shared by the transforms; keeps slice indexing panic-free
/// without touching element values.
pub(crate) fn expect_len(what: &str, got: usize, want: usize) -> Result<()> {
    if got != want {
        return Err(Error::Validation(format!(
            "{}: expected {} elements, got {}",
            what, want, got
        )));
    }
    Ok(())
}
