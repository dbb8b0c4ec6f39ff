//! Convention-based policy resolution.
//!
//! Every resource type has at most one policy, registered under a canonical
//! identifier derived from the type's name: `Puppy` is governed by
//! `Puppy.Policy`. This crate owns that convention and the lookup.
//!
//! # Core Concepts
//!
//! - [`Policy`]: the `authorize`/`scope` rules implemented once per type.
//! - [`Resource`]: what a policy is resolved for. An [`Entity`] instance, a
//!   [`TypeRef`], a [`Scope`] or any other value.
//! - [`Registry`]: the immutable table of policies built at startup.
//!   [`Registry::resolve`] maps a resource to a [`Resolution`].
//! - [`Naming`]: the identifier convention, loadable from TOML.
//!
//! # Example
//!
//! ```
//! use policy::{Action, Entity, Policy, Registry, Resolution, Resource, Scope};
//! use serde_json::{Value, json};
//!
//! struct Puppy;
//!
//! impl Entity for Puppy {
//!     const NAME: &'static str = "Puppy";
//! }
//!
//! struct PuppyPolicy;
//!
//! impl Policy<str> for PuppyPolicy {
//!     fn authorize(&self, _user: &str, action: &Action, _resource: &Resource<'_>) -> bool {
//!         action == "index"
//!     }
//!
//!     fn scope(&self, _user: &str, _scope: &Scope, _action: &Action) -> Value {
//!         json!({ "owner": "everyone" })
//!     }
//! }
//!
//! let registry = Registry::<str>::builder()
//!     .register::<Puppy>(PuppyPolicy)
//!     .build()?;
//! let Resolution::Found(policy) = registry.resolve(&Puppy) else {
//!     panic!("Puppy.Policy is registered");
//! };
//! assert_eq!(policy.id().as_str(), "Puppy.Policy");
//! # Ok::<(), policy::Error>(())
//! ```

mod action;
mod error;
mod naming;
mod policy;
mod registry;
mod resource;
mod scope;

pub use action::Action;
pub use error::{Error, Result};
pub use naming::{Naming, PolicyId};
pub use policy::{Policy, PolicyHandle};
pub use registry::{Registry, RegistryBuilder, Resolution};
pub use resource::{Entity, IntoResource, Record, Resource, TypeRef};
pub use scope::{Scope, Source};
