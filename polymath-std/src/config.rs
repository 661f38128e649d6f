//! Library Configuration
//!
//! Selects and prices the conversions a [`Library`](crate::Library) may use.
//!
//! ```toml
//! [[conversions]]
//! from = "boolean"
//! to = "number"
//! cost = 1
//!
//! [[conversions]]
//! from = "number"
//! to = "Complex"   # cost omitted: catalog default
//! ```
//!
//! Listing `conversions` replaces the default set entirely; an empty list
//! disables conversion fallback.

use std::path::{Path, PathBuf};

use polymath::{ConversionTable, TypeTag};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::conversions::{catalog_entry, CATALOG};

/// Errors that can occur while loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown type name `{name}` in conversion rule")]
    UnknownType { name: String },

    #[error("no built-in conversion from {from} to {to}")]
    UnknownConversion { from: TypeTag, to: TypeTag },
}

/// Configuration for the standard library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enabled conversions.
    pub conversions: Vec<ConversionRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            conversions: CATALOG
                .iter()
                .map(|entry| ConversionRule {
                    from: entry.from.name().to_string(),
                    to: entry.to.name().to_string(),
                    cost: Some(entry.default_cost),
                })
                .collect(),
        }
    }
}

/// One enabled conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRule {
    /// Source type name, as written in signatures.
    pub from: String,

    /// Target type name.
    pub to: String,

    /// Cost override. The catalog default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
}

impl Config {
    /// Creates a configuration with every built-in conversion enabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(
            path = %path.display(),
            conversions = config.conversions.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Build the conversion table these rules describe.
    ///
    /// A later rule for the same pair overrides an earlier one.
    pub fn conversion_table(&self) -> Result<ConversionTable, ConfigError> {
        let mut table = ConversionTable::new();
        for rule in &self.conversions {
            let from = parse_type(&rule.from)?;
            let to = parse_type(&rule.to)?;
            let entry =
                catalog_entry(from, to).ok_or(ConfigError::UnknownConversion { from, to })?;
            table = table.with(from, to, rule.cost.unwrap_or(entry.default_cost), entry.coerce);
        }
        Ok(table)
    }
}

fn parse_type(name: &str) -> Result<TypeTag, ConfigError> {
    TypeTag::from_name(name.trim()).ok_or_else(|| ConfigError::UnknownType {
        name: name.to_string(),
    })
}
