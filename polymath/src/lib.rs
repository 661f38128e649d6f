//! Typed multiple dispatch for numeric operations.
//!
//! `polymath` routes a named operation to the implementation that matches
//! the runtime types of its arguments: plain numbers, decimals, fractions,
//! complex numbers, units, and nested arrays or matrices of any of these.
//!
//! ```ignore
//! use polymath::{unary, ConversionTable, Registry, Value};
//!
//! let mut registry = Registry::new(ConversionTable::new());
//! let negate = registry.define("negate", [
//!     ("number", unary(|_, x| Ok(Value::Number(-x.as_number().unwrap_or_default())))),
//!     ("Array | Matrix", unary(|op, x| polymath::deep_map(x, |e| op.call_one(e)))),
//! ])?;
//!
//! assert_eq!(negate.call_one(&Value::from(vec![1, -2]))?, Value::from(vec![-1, 2]));
//! ```

pub mod collection;
pub mod conversion;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod signature;
pub mod stack;
pub mod value;

pub use collection::{deep_map, deep_map_skipping, deep_zip, shape, Shape};
pub use conversion::{CoerceFn, Conversion, ConversionTable};
pub use dispatch::{
    binary, implementation, unary, Candidate, Implementation, Operation, PlannedConversion,
    Resolution,
};
pub use error::{
    ConversionFailure, DispatchError, DispatchResult, ErrorKind, SignatureError, TypeMismatch,
};
pub use registry::Registry;
pub use signature::{Signature, TypeToken};
pub use value::{Matrix, TypeTag, Unit, Value};
