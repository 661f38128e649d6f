//! Standard numeric operations for `polymath`.
//!
//! This crate defines the operation library on top of the dispatch core:
//!
//! - [`ops`] - `sign`, `bit_not`, `abs`, `unary_minus` and `bit_and`
//! - [`conversions`] - the built-in conversion catalog and its default costs
//! - [`config`] - TOML configuration of the conversion table
//! - [`Library`] - a registry with every standard operation defined
//!
//! ```ignore
//! use polymath::Value;
//! use polymath_std::Library;
//!
//! let library = Library::new()?;
//! let signs = library.sign().call_one(&Value::from(vec![3, -2, 0]))?;
//! assert_eq!(signs, Value::from(vec![1, -1, 0]));
//! ```

pub mod config;
pub mod conversions;
pub mod error;
pub mod library;
pub mod ops;

pub use config::{Config, ConfigError, ConversionRule};
pub use error::LibraryError;
pub use library::Library;
pub use ops::StandardOps;
