//! A ready-to-use registry with every standard operation defined.

use polymath::{DispatchResult, Operation, Registry, Value};
use tracing::debug;

use crate::config::Config;
use crate::conversions::default_table;
use crate::error::LibraryResult;
use crate::ops::{self, StandardOps};

/// The standard operations, bound to one conversion table.
///
/// Immutable once built; share it across threads behind an `Arc` or by
/// reference.
#[derive(Debug)]
pub struct Library {
    registry: Registry,
    ops: StandardOps,
}

impl Library {
    /// Build with the default conversion catalog.
    pub fn new() -> LibraryResult<Self> {
        Self::from_registry(Registry::new(default_table()))
    }

    /// Build with the conversions selected by `config`.
    pub fn with_config(config: &Config) -> LibraryResult<Self> {
        Self::from_registry(Registry::new(config.conversion_table()?))
    }

    fn from_registry(mut registry: Registry) -> LibraryResult<Self> {
        let ops = ops::define_all(&mut registry)?;
        debug!(
            operations = registry.len(),
            conversions = registry.conversions().len(),
            "library ready"
        );
        Ok(Self { registry, ops })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn sign(&self) -> &Operation {
        &self.ops.sign
    }

    pub fn abs(&self) -> &Operation {
        &self.ops.abs
    }

    pub fn unary_minus(&self) -> &Operation {
        &self.ops.unary_minus
    }

    pub fn bit_not(&self) -> &Operation {
        &self.ops.bit_not
    }

    pub fn bit_and(&self) -> &Operation {
        &self.ops.bit_and
    }

    /// Invoke an operation by name.
    pub fn call(&self, name: &str, args: &[Value]) -> DispatchResult<Value> {
        self.registry.call(name, args)
    }
}
