//! Core building blocks for unitcube.
//!
//! This crate hosts what every other unitcube crate depends on:
//! - the error/result types
//! - runtime-typed dense arrays (`Array`, `Dtype`)
//! - the [`Prior`] capability contract that the sampler programs against

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::Prior;
pub use types::{broadcast_pair, Array, ArrayData, Dtype};
