//! Scope descriptors for collection queries.

use crate::{Entity, TypeRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The `(label, type)` pair a scope selects from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub label: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

/// A request to filter a collection rather than check a single instance.
///
/// Only `from` takes part in policy resolution. Clauses are opaque and
/// passed through to the policy untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub from: Source,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub clauses: BTreeMap<String, Value>,
}

impl Scope {
    pub fn new(label: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            from: Source {
                label: label.into(),
                type_ref,
            },
            clauses: BTreeMap::new(),
        }
    }

    /// Scope over an entity type.
    pub fn of<E: Entity>(label: impl Into<String>) -> Self {
        Self::new(label, TypeRef::of::<E>())
    }

    /// Attach an opaque clause.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.insert(key.into(), value.into());
        self
    }

    pub fn clause(&self, key: &str) -> Option<&Value> {
        self.clauses.get(key)
    }

    pub fn label(&self) -> &str {
        &self.from.label
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.from.type_ref
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_under_from_key() {
        let scope = Scope::new("puppies", TypeRef::new("Puppy")).with("owner_id", 7);
        let value = serde_json::to_value(&scope).unwrap();
        assert_eq!(
            value,
            json!({
                "from": { "label": "puppies", "type": "Puppy" },
                "clauses": { "owner_id": 7 }
            })
        );
    }

    #[test]
    fn test_parse_json() {
        let scope: Scope =
            serde_json::from_value(json!({ "from": { "label": "kittens", "type": "Pets.Kitten" } }))
                .unwrap();
        assert_eq!(scope.label(), "kittens");
        assert_eq!(scope.type_ref().name(), "Pets.Kitten");
        assert!(scope.clauses.is_empty());
    }

    #[test]
    fn clauses_are_kept() {
        let scope = Scope::new("puppies", TypeRef::new("Puppy")).with("limit", 10);
        assert_eq!(scope.clause("limit"), Some(&json!(10)));
        assert_eq!(scope.clause("offset"), None);
    }
}
