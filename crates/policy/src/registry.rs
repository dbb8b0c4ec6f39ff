//! Policy registry and resolution.

use crate::{Entity, Error, IntoResource, Naming, Policy, PolicyHandle, PolicyId, Result, TypeRef};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Outcome of resolving a policy for a resource.
pub enum Resolution<U: ?Sized, S = Value> {
    /// A policy is registered for the resource's type.
    Found(PolicyHandle<U, S>),
    /// No policy was found.
    ///
    /// `None` means there was no resource to resolve for. `Some(id)` carries
    /// the identifier that had no registration.
    NotFound(Option<PolicyId>),
}

impl<U: ?Sized, S> Resolution<U, S> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(self) -> Option<PolicyHandle<U, S>> {
        match self {
            Self::Found(handle) => Some(handle),
            Self::NotFound(_) => None,
        }
    }
}

impl<U: ?Sized, S> Clone for Resolution<U, S> {
    fn clone(&self) -> Self {
        match self {
            Self::Found(handle) => Self::Found(handle.clone()),
            Self::NotFound(id) => Self::NotFound(id.clone()),
        }
    }
}

impl<U: ?Sized, S> PartialEq for Resolution<U, S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Found(a), Self::Found(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            _ => false,
        }
    }
}

impl<U: ?Sized, S> fmt::Debug for Resolution<U, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(handle) => f.debug_tuple("Found").field(handle.id()).finish(),
            Self::NotFound(id) => f.debug_tuple("NotFound").field(id).finish(),
        }
    }
}

/// Immutable table of policies keyed by canonical identifier.
///
/// Built once at startup and shared read-only, typically behind an `Arc`.
pub struct Registry<U: ?Sized, S = Value> {
    naming: Naming,
    policies: HashMap<PolicyId, Arc<dyn Policy<U, S>>>,
}

impl<U: ?Sized, S> Registry<U, S> {
    /// Start a registry using the default naming convention.
    pub fn builder() -> RegistryBuilder<U, S> {
        RegistryBuilder::new(Naming::default())
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    /// Find the policy for a resource.
    ///
    /// Instances resolve by their runtime type, type references by
    /// themselves and scopes by the type in their `from` source. Nothing is
    /// cached; every call performs the lookup.
    pub fn resolve<'a>(&self, resource: impl IntoResource<'a>) -> Resolution<U, S> {
        let Some(resource) = resource.into_resource() else {
            debug!("no resource to resolve a policy for");
            return Resolution::NotFound(None);
        };
        trace!(?resource, "resolving policy");
        self.resolve_type(&resource.type_ref())
    }

    /// Find the policy for a type.
    pub fn resolve_type(&self, ty: &TypeRef) -> Resolution<U, S> {
        let id = self.naming.policy_id(ty);
        match self.policies.get(&id) {
            Some(policy) => {
                trace!(policy = %id, "resolved policy");
                Resolution::Found(PolicyHandle::new(id, Arc::clone(policy)))
            }
            None => {
                debug!(policy = %id, resource_type = %ty, "no policy registered");
                Resolution::NotFound(Some(id))
            }
        }
    }

    /// Whether a policy is registered for the type.
    pub fn contains(&self, ty: &TypeRef) -> bool {
        self.policies.contains_key(&self.naming.policy_id(ty))
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&PolicyId> {
        let mut ids: Vec<_> = self.policies.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl<U: ?Sized, S> fmt::Debug for Registry<U, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("naming", &self.naming)
            .field("policies", &self.ids())
            .finish()
    }
}

/// Builder collecting policies before the registry is frozen.
pub struct RegistryBuilder<U: ?Sized, S = Value> {
    naming: Naming,
    policies: HashMap<PolicyId, Arc<dyn Policy<U, S>>>,
    duplicate: Option<PolicyId>,
}

impl<U: ?Sized, S> RegistryBuilder<U, S> {
    pub fn new(naming: Naming) -> Self {
        Self {
            naming,
            policies: HashMap::new(),
            duplicate: None,
        }
    }

    /// Register the policy for an entity type.
    pub fn register<E: Entity>(self, policy: impl Policy<U, S> + 'static) -> Self {
        self.register_type(TypeRef::of::<E>(), policy)
    }

    /// Register the policy for a type by reference.
    pub fn register_type(mut self, ty: TypeRef, policy: impl Policy<U, S> + 'static) -> Self {
        let id = self.naming.policy_id(&ty);
        if self.policies.contains_key(&id) {
            if self.duplicate.is_none() {
                self.duplicate = Some(id);
            }
            return self;
        }
        debug!(policy = %id, resource_type = %ty, "registered policy");
        self.policies.insert(id, Arc::new(policy));
        self
    }

    /// Freeze the registry.
    ///
    /// Fails if the naming convention is invalid or a type was registered
    /// more than once.
    pub fn build(self) -> Result<Registry<U, S>> {
        self.naming.validate()?;
        if let Some(id) = self.duplicate {
            return Err(Error::Duplicate(id));
        }
        Ok(Registry {
            naming: self.naming,
            policies: self.policies,
        })
    }
}
