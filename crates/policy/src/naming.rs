//! Canonical policy naming.

use crate::{Error, Result, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Canonical identifier a policy is registered and looked up under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(String);

impl PolicyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PolicyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Naming convention mapping a type to its policy identifier.
///
/// The identifier for type `T` is `name(T) + separator + suffix`, so with the
/// defaults `Widget` maps to `Widget.Policy` and `Shop.Widget` to
/// `Shop.Widget.Policy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Naming {
    /// Appended to every type name (default `Policy`).
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Placed between the type name and the suffix (default `.`).
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_suffix() -> String {
    "Policy".to_string()
}

fn default_separator() -> String {
    ".".to_string()
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            separator: default_separator(),
        }
    }
}

impl Naming {
    /// Load naming from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse naming from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        let naming: Self = toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        naming.validate()?;
        Ok(naming)
    }

    /// Reject conventions that would make identifiers ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.suffix.trim().is_empty() {
            return Err(Error::Invalid("suffix must not be empty".to_string()));
        }
        if self.suffix.contains(char::is_whitespace) || self.separator.contains(char::is_whitespace) {
            return Err(Error::Invalid(format!(
                "suffix {:?} and separator {:?} must not contain whitespace",
                self.suffix, self.separator
            )));
        }
        Ok(())
    }

    /// Canonical policy identifier for a type.
    pub fn policy_id(&self, ty: &TypeRef) -> PolicyId {
        PolicyId(format!("{}{}{}", ty.name(), self.separator, self.suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_appends_policy_suffix() {
        let naming = Naming::default();
        assert_eq!(naming.policy_id(&TypeRef::new("Widget")).as_str(), "Widget.Policy");
    }

    #[test]
    fn nested_namespace_is_preserved() {
        let naming = Naming::default();
        let id = naming.policy_id(&TypeRef::new("Shop.Inventory.Widget"));
        assert_eq!(id.to_string(), "Shop.Inventory.Widget.Policy");
    }

    #[test]
    fn test_parse_toml() {
        let naming = Naming::parse(
            r#"
suffix = "Rules"
separator = "::"
"#,
        )
        .unwrap();
        assert_eq!(naming.policy_id(&TypeRef::new("Puppy")).as_str(), "Puppy::Rules");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let naming = Naming::parse("").unwrap();
        assert_eq!(naming, Naming::default());
    }

    #[test]
    fn empty_suffix_is_invalid() {
        let err = Naming::parse(r#"suffix = """#).unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Naming::parse("suffix = ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "suffix = \"Guard\"").unwrap();

        let naming = Naming::load(file.path()).unwrap();
        assert_eq!(naming.separator, ".");
        assert_eq!(naming.policy_id(&TypeRef::new("Puppy")).as_str(), "Puppy.Guard");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Naming::load("/nonexistent/naming.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
