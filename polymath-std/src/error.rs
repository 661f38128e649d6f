//! Errors raised while building a [`Library`](crate::Library).

use polymath::SignatureError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid operation definition: {0}")]
    Signature(#[from] SignatureError),
}

/// Result type for library construction.
pub type LibraryResult<T> = Result<T, LibraryError>;
