//! The policy capability and handles to registered policies.

use crate::{Action, PolicyId, Resource, Scope};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Authorization rules for one resource type.
///
/// `U` is the host's user type. `S` is whatever a scope resolves to, for
/// example a query filter; the core never inspects it.
///
/// Policies are stateless and registered once at startup. Anything a policy
/// panics with propagates to the caller unchanged.
pub trait Policy<U: ?Sized, S = Value>: Send + Sync {
    /// Decide whether `user` may perform `action` on `resource`.
    fn authorize(&self, user: &U, action: &Action, resource: &Resource<'_>) -> bool;

    /// Narrow a collection query to what `user` may see for `action`.
    fn scope(&self, user: &U, scope: &Scope, action: &Action) -> S;
}

/// A resolved policy.
///
/// Cloning is cheap. Two handles are equal when they point at the same
/// registered policy.
pub struct PolicyHandle<U: ?Sized, S = Value> {
    id: PolicyId,
    policy: Arc<dyn Policy<U, S>>,
}

impl<U: ?Sized, S> PolicyHandle<U, S> {
    pub(crate) fn new(id: PolicyId, policy: Arc<dyn Policy<U, S>>) -> Self {
        Self { id, policy }
    }

    /// Identifier the policy was registered under.
    pub fn id(&self) -> &PolicyId {
        &self.id
    }

    pub fn authorize(&self, user: &U, action: &Action, resource: &Resource<'_>) -> bool {
        self.policy.authorize(user, action, resource)
    }

    pub fn scope(&self, user: &U, scope: &Scope, action: &Action) -> S {
        self.policy.scope(user, scope, action)
    }
}

impl<U: ?Sized, S> Clone for PolicyHandle<U, S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            policy: Arc::clone(&self.policy),
        }
    }
}

impl<U: ?Sized, S> PartialEq for PolicyHandle<U, S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::addr_eq(Arc::as_ptr(&self.policy), Arc::as_ptr(&other.policy))
    }
}

impl<U: ?Sized, S> Eq for PolicyHandle<U, S> {}

impl<U: ?Sized, S> fmt::Debug for PolicyHandle<U, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyHandle").field("id", &self.id).finish_non_exhaustive()
    }
}
