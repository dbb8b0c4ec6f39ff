//! Action labels passed through to policies.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A caller-defined action label such as `index` or `show`.
///
/// Actions have no fixed enumeration; policies match on the label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Cow<'static, str>);

impl Action {
    pub const fn new(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Action {
    fn from(label: &'static str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Action {
    fn from(label: String) -> Self {
        Self(Cow::Owned(label))
    }
}

impl PartialEq<str> for Action {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Action {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
