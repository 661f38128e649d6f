//! One-way, cost-weighted type conversions.
//!
//! The table is supplied by the environment when a [`Registry`] is built;
//! the dispatcher only consults it when no signature matches the argument
//! types exactly.
//!
//! [`Registry`]: crate::registry::Registry

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::ConversionFailure;
use crate::value::{TypeTag, Value};

/// A coercion from one value representation to another.
pub type CoerceFn = dyn Fn(&Value) -> Result<Value, ConversionFailure> + Send + Sync;

/// A registered conversion between two type tags.
#[derive(Clone)]
pub struct Conversion {
    from: TypeTag,
    to: TypeTag,
    cost: u32,
    coerce: Arc<CoerceFn>,
}

impl Conversion {
    pub fn new<F>(from: TypeTag, to: TypeTag, cost: u32, coerce: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ConversionFailure> + Send + Sync + 'static,
    {
        Self {
            from,
            to,
            cost,
            coerce: Arc::new(coerce),
        }
    }

    pub fn from(&self) -> TypeTag {
        self.from
    }

    pub fn to(&self) -> TypeTag {
        self.to
    }

    /// Relative cost; lower is preferred.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn apply(&self, value: &Value) -> Result<Value, ConversionFailure> {
        (self.coerce)(value)
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

/// The set of permitted conversions, keyed by `(from, to)`.
///
/// A missing entry means no conversion exists in that direction.
#[derive(Clone, Default)]
pub struct ConversionTable {
    entries: FxHashMap<(TypeTag, TypeTag), Conversion>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion, replacing any previous one for the same pair.
    pub fn insert(&mut self, conversion: Conversion) -> &mut Self {
        self.entries
            .insert((conversion.from, conversion.to), conversion);
        self
    }

    /// Builder form of [`ConversionTable::insert`].
    pub fn with<F>(mut self, from: TypeTag, to: TypeTag, cost: u32, coerce: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ConversionFailure> + Send + Sync + 'static,
    {
        self.insert(Conversion::new(from, to, cost, coerce));
        self
    }

    pub fn lookup(&self, from: TypeTag, to: TypeTag) -> Option<&Conversion> {
        self.entries.get(&(from, to))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All conversions, ordered by source then target tag.
    pub fn iter(&self) -> impl Iterator<Item = &Conversion> {
        let mut all: Vec<&Conversion> = self.entries.values().collect();
        all.sort_by_key(|c| (c.from, c.to));
        all.into_iter()
    }
}

impl fmt::Debug for ConversionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
