//! Common data types for unitcube
//!
//! Priors map between unit-hypercube coordinates and model-space values.
//! Model-space values are dense row-major arrays with a runtime element
//! type, because a single model mixes real, integer, and boolean
//! parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Element type of sampled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    /// 64-bit float
    F64,
    /// 64-bit signed integer
    I64,
    /// Boolean
    Bool,
}

impl Dtype {
    /// Canonical short name used in serialized artifacts.
    pub fn name(&self) -> &'static str {
        match self {
            Dtype::F64 => "f64",
            Dtype::I64 => "i64",
            Dtype::Bool => "bool",
        }
    }

    /// Parse a canonical short name back into a dtype.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "f64" => Ok(Dtype::F64),
            "i64" => Ok(Dtype::I64),
            "bool" => Ok(Dtype::Bool),
            other => Err(Error::Validation(format!("unknown dtype {:?}", other))),
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed storage behind an [`Array`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayData {
    /// Float elements
    F64(Vec<f64>),
    /// Integer elements
    I64(Vec<i64>),
    /// Boolean elements
    Bool(Vec<bool>),
}

impl ArrayData {
    fn len(&self) -> usize {
        match self {
            ArrayData::F64(v) => v.len(),
            ArrayData::I64(v) => v.len(),
            ArrayData::Bool(v) => v.len(),
        }
    }
}

/// Dense row-major array with a runtime element type.
///
/// Scalars are rank-0 (empty shape, one element). The element count always
/// equals the product of the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Array {
    shape: Vec<usize>,
    data: ArrayData,
}

/// Product of a shape's dimensions (1 for rank-0).
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

impl Array {
    fn new(shape: Vec<usize>, data: ArrayData) -> Result<Self> {
        if numel(&shape) != data.len() {
            return Err(Error::Validation(format!(
                "shape {:?} implies {} elements, data has {}",
                shape,
                numel(&shape),
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Float array with explicit shape.
    pub fn from_f64(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        Self::new(shape, ArrayData::F64(data))
    }

    /// Integer array with explicit shape.
    pub fn from_i64(shape: Vec<usize>, data: Vec<i64>) -> Result<Self> {
        Self::new(shape, ArrayData::I64(data))
    }

    /// Boolean array with explicit shape.
    pub fn from_bool(shape: Vec<usize>, data: Vec<bool>) -> Result<Self> {
        Self::new(shape, ArrayData::Bool(data))
    }

    /// Rank-0 float scalar.
    pub fn scalar_f64(v: f64) -> Self {
        Self { shape: vec![], data: ArrayData::F64(vec![v]) }
    }

    /// 1-D float vector.
    pub fn vector_f64(data: Vec<f64>) -> Self {
        Self { shape: vec![data.len()], data: ArrayData::F64(data) }
    }

    /// Float array of `shape` filled with `v`.
    pub fn full_f64(shape: Vec<usize>, v: f64) -> Self {
        let n = numel(&shape);
        Self { shape, data: ArrayData::F64(vec![v; n]) }
    }

    /// Element type.
    pub fn dtype(&self) -> Dtype {
        match &self.data {
            ArrayData::F64(_) => Dtype::F64,
            ArrayData::I64(_) => Dtype::I64,
            ArrayData::Bool(_) => Dtype::Bool,
        }
    }

    /// Shape (empty for rank-0 scalars).
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total element count.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Raw storage.
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Float elements, or a validation error for other dtypes.
    pub fn as_f64(&self) -> Result<&[f64]> {
        match &self.data {
            ArrayData::F64(v) => Ok(v),
            other => Err(Error::Validation(format!(
                "expected f64 array, got {}",
                dtype_of(other)
            ))),
        }
    }

    /// Integer elements, or a validation error for other dtypes.
    pub fn as_i64(&self) -> Result<&[i64]> {
        match &self.data {
            ArrayData::I64(v) => Ok(v),
            other => Err(Error::Validation(format!(
                "expected i64 array, got {}",
                dtype_of(other)
            ))),
        }
    }

    /// Boolean elements, or a validation error for other dtypes.
    pub fn as_bool(&self) -> Result<&[bool]> {
        match &self.data {
            ArrayData::Bool(v) => Ok(v),
            other => Err(Error::Validation(format!(
                "expected bool array, got {}",
                dtype_of(other)
            ))),
        }
    }
}

fn dtype_of(data: &ArrayData) -> Dtype {
    match data {
        ArrayData::F64(_) => Dtype::F64,
        ArrayData::I64(_) => Dtype::I64,
        ArrayData::Bool(_) => Dtype::Bool,
    }
}

/// Broadcast two float parameter arrays to a common shape.
///
/// Supported cases: equal shapes, or one side rank-0 (expanded to the other
/// side's shape). Anything else is a validation error; distribution
/// parameters are either scalars or arrays of the event shape.
pub fn broadcast_pair(a: &Array, b: &Array) -> Result<(Array, Array)> {
    let av = a.as_f64()?;
    let bv = b.as_f64()?;
    if a.shape() == b.shape() {
        return Ok((a.clone(), b.clone()));
    }
    if a.shape().is_empty() {
        let expanded = Array::full_f64(b.shape().to_vec(), av[0]);
        return Ok((expanded, b.clone()));
    }
    if b.shape().is_empty() {
        let expanded = Array::full_f64(a.shape().to_vec(), bv[0]);
        return Ok((a.clone(), expanded));
    }
    Err(Error::Validation(format!(
        "cannot broadcast shapes {:?} and {:?}; parameters must be scalar or share a shape",
        a.shape(),
        b.shape()
    )))
}
