//! Core types for propenum.
//! Parsers decode into [`PropertyEntry`]; the emitter builds an [`EnumSpec`]
//! from them and renders it.

use serde::{Deserialize, Serialize};

/// A single key/value pair from a properties file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
}

impl PropertyEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for PropertyEntry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// One enum constant, created for one accepted property entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedField {
    /// The enum constant name, e.g. `MY_KEY`.
    pub identifier: String,
    /// The property key as written in the source file, e.g. `myKey`.
    pub original_key: String,
    /// The property value; only used for the constant's javadoc.
    pub value: String,
}

/// In-memory description of one generated enum type.
///
/// Fields keep the order of the source entries and are unique by
/// identifier; [`crate::emitter::EnumEmitter`] guarantees both before
/// adding them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumSpec {
    pub type_name: String,
    /// Empty for the default package.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub package_name: String,
    /// Fully qualified name of the interface the enum implements, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
    /// Source path relative to the base directory, `/`-separated.
    pub source_path: String,
    /// Value returned by the generated `getBaseName()` accessor.
    pub resource_base_name: String,
    pub fields: Vec<GeneratedField>,
}

impl EnumSpec {
    pub fn new(type_name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            package_name: package_name.into(),
            interface_name: None,
            source_path: String::new(),
            resource_base_name: String::new(),
            fields: Vec::new(),
        }
    }

    pub(crate) fn push_field(&mut self, field: GeneratedField) {
        self.fields.push(field);
    }

    /// Fully qualified name of the enum type.
    pub fn qualified_name(&self) -> String {
        if self.package_name.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.package_name, self.type_name)
        }
    }

    /// Identifiers in declaration order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.identifier.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        assert_eq!(
            EnumSpec::new("Messages", "com.example").qualified_name(),
            "com.example.Messages"
        );
        assert_eq!(EnumSpec::new("Messages", "").qualified_name(), "Messages");
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let mut spec = EnumSpec::new("Messages", "");
        for (identifier, key) in [("B", "b"), ("A", "a")] {
            spec.push_field(GeneratedField {
                identifier: identifier.to_string(),
                original_key: key.to_string(),
                value: String::new(),
            });
        }
        assert_eq!(spec.identifiers(), vec!["B", "A"]);
        assert_eq!(spec.fields[1].original_key, "a");
    }

    #[test]
    fn test_serialize_skips_empty_package_and_interface() {
        let spec = EnumSpec::new("Messages", "");
        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("package_name").is_none());
        assert!(json.get("interface_name").is_none());
        assert_eq!(json["type_name"], "Messages");
    }

    #[test]
    fn test_property_entry_from_tuple() {
        let entry = PropertyEntry::from(("myKey", "My Key"));
        assert_eq!(entry, PropertyEntry::new("myKey", "My Key"));
    }
}
