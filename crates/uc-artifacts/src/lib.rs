//! Structured state serialization for unitcube.
//!
//! The sampler's checkpoint/result state is an arbitrary tree of records
//! with named fields, arrays, lists, and maps. This crate round-trips
//! that tree to a plain JSON-expressible form:
//!
//! - records become tagged maps carrying a fully-qualified class name
//! - arrays become tagged maps carrying dtype, shape, and flattened data
//! - lists and maps are walked element/value-wise
//! - scalars pass through
//!
//! Deserialization is the exact inverse, resolving class names through an
//! explicit [`TypeRegistry`] populated at process startup. An unregistered
//! class fails with [`uc_core::Error::UnresolvedType`]; there is no
//! partial reconstruction.

pub mod bridge;
pub mod records;
pub mod registry;
pub mod state;

pub use bridge::{deserialise, from_json_str, serialise, to_json_string};
pub use records::{register_all, CheckpointState, EvidenceSummary, SamplerSettings};
pub use registry::TypeRegistry;
pub use state::{Fields, Record, StateRecord, StateValue};
