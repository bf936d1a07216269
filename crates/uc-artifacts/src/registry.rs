//! Explicit class-name registry for record reconstruction.
//!
//! The original design resolved record classes by dynamic module import;
//! here the mapping from fully-qualified class names to factories is an
//! ordinary table populated at process startup, which keeps the
//! extensibility contract without any runtime loading machinery.

use std::collections::BTreeMap;

use uc_core::Result;

use crate::state::{Fields, StateRecord, StateValue};

type Factory = fn(Fields) -> Result<StateValue>;

/// Maps fully-qualified class names to record factories.
#[derive(Default)]
pub struct TypeRegistry {
    factories: BTreeMap<String, Factory>,
}

impl TypeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record type under its [`StateRecord::CLASS`] name.
    ///
    /// Re-registering a name replaces the previous factory.
    pub fn register<T: StateRecord>(&mut self) {
        let prev = self.factories.insert(T::CLASS.to_string(), rebuild::<T>);
        if prev.is_some() {
            log::warn!("replacing serialization factory for {}", T::CLASS);
        }
    }

    /// Whether `class` is resolvable.
    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    pub(crate) fn resolve(&self, class: &str) -> Option<Factory> {
        self.factories.get(class).copied()
    }
}

/// Reconstruct through the concrete type: validates the fields and
/// re-emits the normalized record.
fn rebuild<T: StateRecord>(fields: Fields) -> Result<StateValue> {
    Ok(T::from_fields(&fields)?.to_state())
}
