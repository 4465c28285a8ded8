//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the planbar application.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal I/O failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for planbar operations.
pub type Result<T> = std::result::Result<T, Error>;
