//! Policy error types.

use crate::PolicyId;
use thiserror::Error;

/// Errors raised while configuring naming or building a registry.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Two policies were registered under the same identifier.
    #[error("duplicate policy: {0}")]
    Duplicate(PolicyId),

    /// The naming configuration is invalid.
    #[error("invalid naming: {0}")]
    Invalid(String),

    /// Failed to parse a naming configuration file.
    #[error("failed to parse naming config: {0}")]
    Parse(String),

    /// An I/O error occurred while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
