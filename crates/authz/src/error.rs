//! Authorization error types.

use policy::PolicyId;
use thiserror::Error;

/// Authorization errors.
///
/// Both variants are programming mistakes, never a denial: a missing policy
/// is always an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// There was no resource to resolve a policy for.
    #[error("no policy for nil object")]
    NoPolicyTarget,

    /// No policy is registered under the canonical identifier.
    #[error("policy not found: {0}")]
    PolicyNotFound(PolicyId),
}

pub type Result<T> = std::result::Result<T, Error>;
