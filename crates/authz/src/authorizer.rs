//! Resolve-then-dispatch entry points.

use crate::{Error, Result};
use policy::{Action, IntoResource, PolicyHandle, Registry, Resolution, Resource, Scope};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// Dispatches authorization and scoping to the policy registered for a
/// resource's type.
///
/// Each call resolves the policy afresh and returns the policy's answer
/// unchanged. Cloning shares the underlying registry.
pub struct Authorizer<U: ?Sized, S = Value> {
    registry: Arc<Registry<U, S>>,
}

impl<U: ?Sized, S> Authorizer<U, S> {
    pub fn new(registry: impl Into<Arc<Registry<U, S>>>) -> Self {
        Self {
            registry: registry.into(),
        }
    }

    pub fn registry(&self) -> &Registry<U, S> {
        &self.registry
    }

    /// Resolve the policy for a resource, failing if there is none.
    pub fn resolve_policy<'a>(&self, resource: impl IntoResource<'a>) -> Result<PolicyHandle<U, S>> {
        match self.registry.resolve(resource) {
            Resolution::Found(policy) => Ok(policy),
            Resolution::NotFound(None) => {
                warn!("policy requested for nil object");
                Err(Error::NoPolicyTarget)
            }
            Resolution::NotFound(Some(id)) => {
                warn!(policy = %id, "policy not found");
                Err(Error::PolicyNotFound(id))
            }
        }
    }

    /// Check whether `user` may perform `action` on `resource`.
    ///
    /// ```
    /// use authz::{Authorizer, Error};
    /// use policy::{Action, Entity, Policy, Registry, Resource, Scope, TypeRef};
    /// use serde_json::Value;
    ///
    /// struct Puppy;
    /// impl Entity for Puppy {
    ///     const NAME: &'static str = "Puppy";
    /// }
    ///
    /// struct Kitten;
    /// impl Entity for Kitten {
    ///     const NAME: &'static str = "Kitten";
    /// }
    ///
    /// struct PuppyPolicy;
    /// impl Policy<str> for PuppyPolicy {
    ///     fn authorize(&self, _: &str, action: &Action, _: &Resource<'_>) -> bool {
    ///         action == "index"
    ///     }
    ///     fn scope(&self, _: &str, _: &Scope, _: &Action) -> Value {
    ///         Value::Null
    ///     }
    /// }
    ///
    /// let registry = Registry::<str>::builder().register::<Puppy>(PuppyPolicy).build()?;
    /// let authz: Authorizer<str> = Authorizer::new(registry);
    ///
    /// assert_eq!(authz.authorize("user", "index", TypeRef::of::<Puppy>()), Ok(true));
    /// assert_eq!(authz.authorize("user", "show", &Puppy), Ok(false));
    /// assert!(matches!(
    ///     authz.authorize("user", "index", &Kitten),
    ///     Err(Error::PolicyNotFound(id)) if id.as_str() == "Kitten.Policy"
    /// ));
    /// # Ok::<(), policy::Error>(())
    /// ```
    pub fn authorize<'a>(
        &self,
        user: &U,
        action: impl Into<Action>,
        resource: impl IntoResource<'a>,
    ) -> Result<bool> {
        let Some(resource) = resource.into_resource() else {
            warn!("authorization requested for nil object");
            return Err(Error::NoPolicyTarget);
        };
        let policy = self.resolve_policy(resource.clone())?;
        Ok(self.authorize_with(&policy, user, action, &resource))
    }

    /// Check against an already resolved policy.
    pub fn authorize_with(
        &self,
        policy: &PolicyHandle<U, S>,
        user: &U,
        action: impl Into<Action>,
        resource: &Resource<'_>,
    ) -> bool {
        let action = action.into();
        let allowed = policy.authorize(user, &action, resource);
        trace!(policy = %policy.id(), %action, allowed, "authorization dispatched");
        allowed
    }

    /// Ask the policy for the type in `scope.from` to narrow a query.
    pub fn scope(&self, user: &U, scope: &Scope, action: impl Into<Action>) -> Result<S> {
        let policy = self.resolve_policy(scope)?;
        Ok(self.scope_with(&policy, user, scope, action))
    }

    /// Scope against an already resolved policy.
    pub fn scope_with(
        &self,
        policy: &PolicyHandle<U, S>,
        user: &U,
        scope: &Scope,
        action: impl Into<Action>,
    ) -> S {
        let action = action.into();
        trace!(policy = %policy.id(), %action, source = scope.label(), "scope dispatched");
        policy.scope(user, scope, &action)
    }
}

impl<U: ?Sized, S> Clone for Authorizer<U, S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<U: ?Sized, S> fmt::Debug for Authorizer<U, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorizer").field("registry", &self.registry).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy::{Entity, Policy, TypeRef};
    use serde_json::json;

    struct Puppy {
        owner: &'static str,
    }

    impl Entity for Puppy {
        const NAME: &'static str = "Puppy";
    }

    struct OwnerPolicy;

    impl Policy<str> for OwnerPolicy {
        fn authorize(&self, user: &str, action: &Action, resource: &Resource<'_>) -> bool {
            match resource.downcast_ref::<Puppy>() {
                Some(puppy) => puppy.owner == user,
                None => action == "index",
            }
        }

        fn scope(&self, user: &str, scope: &Scope, _action: &Action) -> Value {
            json!({ "from": scope.label(), "owner": user })
        }
    }

    fn authz() -> Authorizer<str> {
        Authorizer::new(
            Registry::<str>::builder()
                .register::<Puppy>(OwnerPolicy)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn instance_reaches_policy_unchanged() {
        let authz = authz();
        assert_eq!(authz.authorize("ann", "update", &Puppy { owner: "ann" }), Ok(true));
        assert_eq!(authz.authorize("bob", "update", &Puppy { owner: "ann" }), Ok(false));
    }

    #[test]
    fn nil_resource_is_no_policy_target() {
        let authz = authz();
        assert_eq!(authz.authorize("ann", "index", None::<TypeRef>), Err(Error::NoPolicyTarget));
        assert_eq!(authz.resolve_policy(None::<TypeRef>).unwrap_err(), Error::NoPolicyTarget);
    }

    #[test]
    fn missing_policy_message_names_identifier() {
        let err = authz()
            .authorize("ann", "index", TypeRef::new("Kitten"))
            .unwrap_err();
        assert_eq!(err.to_string(), "policy not found: Kitten.Policy");
        assert_eq!(Error::NoPolicyTarget.to_string(), "no policy for nil object");
    }

    #[test]
    fn with_variants_skip_resolution() {
        let authz = authz();
        let policy = authz.resolve_policy(TypeRef::of::<Puppy>()).unwrap();
        let scope = Scope::of::<Puppy>("puppies");

        assert!(authz.authorize_with(&policy, "ann", "index", &Resource::Type(TypeRef::of::<Puppy>())));
        assert_eq!(
            authz.scope_with(&policy, "ann", &scope, "index"),
            json!({ "from": "puppies", "owner": "ann" })
        );
    }

    #[test]
    fn scope_resolves_from_source_type() {
        let authz = authz();
        let scope = Scope::of::<Puppy>("puppies");
        assert_eq!(
            authz.scope("bob", &scope, "index"),
            Ok(json!({ "from": "puppies", "owner": "bob" }))
        );

        let stray = Scope::new("kittens", TypeRef::new("Kitten"));
        assert!(matches!(
            authz.scope("bob", &stray, "index"),
            Err(Error::PolicyNotFound(id)) if id.as_str() == "Kitten.Policy"
        ));
    }
}
