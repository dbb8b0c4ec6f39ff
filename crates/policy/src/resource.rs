//! Resources a policy can be resolved for.

use crate::Scope;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// A reference to a resource type, identified by its dotted name.
///
/// Namespaces nest with `.`, e.g. `Shop.Widget`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(Cow<'static, str>);

impl TypeRef {
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Type reference for an entity type.
    pub const fn of<E: Entity>() -> Self {
        Self::new(E::NAME)
    }

    /// Type reference derived from the Rust type of any value.
    ///
    /// The module path is kept with `::` rewritten to `.` and generic
    /// arguments dropped, so `app::models::Puppy<u8>` becomes
    /// `app.models.Puppy`. Built from [`std::any::type_name`], whose format
    /// is unspecified and may change between compiler releases. Register
    /// under the same `of_val` result rather than a hand-written name, or
    /// use [`Resource::value_named`] for a stable name.
    pub fn of_val<T: ?Sized>(_value: &T) -> Self {
        Self::from_rust_path(std::any::type_name::<T>())
    }

    fn from_rust_path(mut path: &str) -> Self {
        while let Some(rest) = path.strip_prefix('&') {
            path = rest.trim_start_matches("mut ");
        }
        let path = path.split('<').next().unwrap_or(path);
        Self::named(path.replace("::", "."))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record type that policies are registered for.
///
/// ```
/// use policy::{Entity, TypeRef};
///
/// struct Puppy {
///     id: u64,
/// }
///
/// impl Entity for Puppy {
///     const NAME: &'static str = "Puppy";
/// }
///
/// assert_eq!(TypeRef::of::<Puppy>().name(), "Puppy");
/// ```
pub trait Entity: Any {
    /// Dotted type name the policy identifier is derived from.
    const NAME: &'static str;
}

/// Object-safe view of an entity instance.
pub trait Record: Any {
    /// Runtime type of this instance.
    fn type_ref(&self) -> TypeRef;

    fn as_any(&self) -> &dyn Any;
}

impl<E: Entity> Record for E {
    fn type_ref(&self) -> TypeRef {
        TypeRef::of::<E>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The subject of an authorization check.
#[derive(Clone)]
pub enum Resource<'a> {
    /// A single entity instance.
    Instance(&'a dyn Record),
    /// The type itself, without an instance.
    Type(TypeRef),
    /// A scope descriptor naming the type through its `from` source.
    Scope(&'a Scope),
    /// Any other value, resolved by its own Rust type.
    Value(&'a dyn Any, TypeRef),
}

impl<'a> Resource<'a> {
    /// Wrap an arbitrary value that is not an [`Entity`], named by its Rust
    /// type through [`TypeRef::of_val`].
    pub fn value<T: Any>(value: &'a T) -> Self {
        Self::Value(value, TypeRef::of_val(value))
    }

    /// Wrap an arbitrary value under an explicit type name.
    pub fn value_named<T: Any>(value: &'a T, type_ref: TypeRef) -> Self {
        Self::Value(value, type_ref)
    }

    /// Type whose policy governs this resource.
    pub fn type_ref(&self) -> TypeRef {
        match self {
            Self::Instance(record) => record.type_ref(),
            Self::Type(ty) => ty.clone(),
            Self::Scope(scope) => scope.type_ref().clone(),
            Self::Value(_, ty) => ty.clone(),
        }
    }

    /// Borrow the underlying instance or value as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        match *self {
            Self::Instance(record) => record.as_any().downcast_ref(),
            Self::Value(value, _) => value.downcast_ref(),
            Self::Type(_) | Self::Scope(_) => None,
        }
    }
}

impl fmt::Debug for Resource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(record) => f.debug_tuple("Instance").field(&record.type_ref()).finish(),
            Self::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
            Self::Scope(scope) => f.debug_tuple("Scope").field(scope).finish(),
            Self::Value(_, ty) => f.debug_tuple("Value").field(ty).finish(),
        }
    }
}

/// Conversion into an optional resource.
///
/// `None` is the nil descriptor: there is no object to find a policy for.
pub trait IntoResource<'a> {
    fn into_resource(self) -> Option<Resource<'a>>;
}

impl<'a> IntoResource<'a> for Resource<'a> {
    fn into_resource(self) -> Option<Resource<'a>> {
        Some(self)
    }
}

impl<'a> IntoResource<'a> for TypeRef {
    fn into_resource(self) -> Option<Resource<'a>> {
        Some(Resource::Type(self))
    }
}

impl<'a> IntoResource<'a> for &'a Scope {
    fn into_resource(self) -> Option<Resource<'a>> {
        Some(Resource::Scope(self))
    }
}

impl<'a, E: Entity> IntoResource<'a> for &'a E {
    fn into_resource(self) -> Option<Resource<'a>> {
        Some(Resource::Instance(self))
    }
}

impl<'a, R: IntoResource<'a>> IntoResource<'a> for Option<R> {
    fn into_resource(self) -> Option<Resource<'a>> {
        self.and_then(IntoResource::into_resource)
    }
}
