//! Authorization dispatch.
//!
//! [`Authorizer`] answers "may this user do this to that?" by finding the
//! policy registered for the resource's type and asking it. It never decides
//! anything itself: a missing policy is an [`Error`], not a denial.
//!
//! | Entry point | Resolves from | Calls |
//! |---|---|---|
//! | [`Authorizer::authorize`] | the resource | `Policy::authorize` |
//! | [`Authorizer::authorize_with`] | (pre-resolved) | `Policy::authorize` |
//! | [`Authorizer::scope`] | `scope.from` | `Policy::scope` |
//! | [`Authorizer::scope_with`] | (pre-resolved) | `Policy::scope` |
//! | [`Authorizer::resolve_policy`] | the resource | nothing |

mod authorizer;
mod error;

pub use authorizer::Authorizer;
pub use error::{Error, Result};
