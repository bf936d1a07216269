//! The structured-state vocabulary.

use std::collections::BTreeMap;

use uc_core::{Array, Error, Result};

/// Named fields of a record.
pub type Fields = BTreeMap<String, StateValue>;

/// A structured state value: the full vocabulary the bridge understands.
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    /// Absent value
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Float scalar
    Float(f64),
    /// String scalar
    Str(String),
    /// Dense typed array
    Array(Array),
    /// Ordered sequence
    List(Vec<StateValue>),
    /// String-keyed mapping
    Map(Fields),
    /// Record with a fully-qualified class name and named fields
    Record(Record),
}

/// A structured record: class name plus named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Fully-qualified class name, resolvable through the registry.
    pub class: String,
    /// Named field values.
    pub fields: Fields,
}

/// A concrete record type that can cross the serialization boundary.
///
/// Implementations give the bridge a way to rebuild the concrete type
/// from its field map, which both validates the fields and normalizes
/// the record on the way back in.
pub trait StateRecord: Sized {
    /// Fully-qualified class name stored in serialized form.
    const CLASS: &'static str;

    /// Decompose into named fields.
    fn to_fields(&self) -> Fields;

    /// Rebuild from named fields.
    fn from_fields(fields: &Fields) -> Result<Self>;

    /// Wrap as a [`StateValue::Record`].
    fn to_state(&self) -> StateValue {
        StateValue::Record(Record { class: Self::CLASS.to_string(), fields: self.to_fields() })
    }
}

fn missing(name: &str) -> Error {
    Error::Validation(format!("missing record field {:?}", name))
}

/// Float field accessor (integers promote).
pub fn field_f64(fields: &Fields, name: &str) -> Result<f64> {
    match fields.get(name) {
        Some(StateValue::Float(v)) => Ok(*v),
        Some(StateValue::Int(v)) => Ok(*v as f64),
        Some(other) => Err(Error::Validation(format!(
            "field {:?}: expected float, got {:?}",
            name, other
        ))),
        None => Err(missing(name)),
    }
}

/// Integer field accessor.
pub fn field_i64(fields: &Fields, name: &str) -> Result<i64> {
    match fields.get(name) {
        Some(StateValue::Int(v)) => Ok(*v),
        Some(other) => Err(Error::Validation(format!(
            "field {:?}: expected integer, got {:?}",
            name, other
        ))),
        None => Err(missing(name)),
    }
}

/// Array field accessor.
pub fn field_array<'a>(fields: &'a Fields, name: &str) -> Result<&'a Array> {
    match fields.get(name) {
        Some(StateValue::Array(a)) => Ok(a),
        Some(other) => Err(Error::Validation(format!(
            "field {:?}: expected array, got {:?}",
            name, other
        ))),
        None => Err(missing(name)),
    }
}

/// Nested record field accessor; checks the class name.
pub fn field_record<'a>(fields: &'a Fields, name: &str, class: &str) -> Result<&'a Fields> {
    match fields.get(name) {
        Some(StateValue::Record(r)) if r.class == class => Ok(&r.fields),
        Some(StateValue::Record(r)) => Err(Error::Validation(format!(
            "field {:?}: expected record of class {:?}, got {:?}",
            name, class, r.class
        ))),
        Some(other) => Err(Error::Validation(format!(
            "field {:?}: expected record, got {:?}",
            name, other
        ))),
        None => Err(missing(name)),
    }
}
