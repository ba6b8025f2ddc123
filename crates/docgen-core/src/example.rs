//! Example values.
//!
//! An [`Example`] is a plausible instance of some type, either registered by
//! hand or synthesized from the type's shape. Struct instances are shared
//! through `Arc` so callers can tell a memoized instance (same allocation on
//! every lookup) from a freshly built one.
//!
//! # Examples
//!
//! ```
//! use docgen_core::Example;
//! use serde_json::json;
//!
//! let epoch = Example::literal(json!(10101));
//! assert_eq!(serde_json::to_string(&epoch).unwrap(), "10101");
//!
//! let list = Example::List(vec![epoch.clone(), epoch]);
//! assert_eq!(serde_json::to_string(&list).unwrap(), "[10101,10101]");
//! ```

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// An example value for one type.
#[derive(Debug, Clone, PartialEq)]
pub enum Example {
    /// Hand-authored JSON literal
    Literal(serde_json::Value),
    /// List example
    List(Vec<Example>),
    /// Fixed-size array example
    Array(Vec<Example>),
    /// Struct instance with its exported fields
    Struct(Arc<StructExample>),
    /// Map example with string keys, in insertion order
    Map(Vec<(String, Example)>),
    /// Opaque stand-in for a polymorphic slot, encoded `{}`
    Placeholder,
    /// No value, encoded `null`
    Unit,
}

impl Example {
    /// Wraps a JSON literal.
    #[must_use]
    pub const fn literal(value: serde_json::Value) -> Self {
        Self::Literal(value)
    }

    /// Wraps a struct instance in a new allocation.
    #[must_use]
    pub fn structure(value: StructExample) -> Self {
        Self::Struct(Arc::new(value))
    }

    /// Returns `true` when both values are the same struct allocation.
    ///
    /// Equal field values are not enough; the instances must be shared.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_core::{Example, StructExample};
    ///
    /// let a = Example::structure(StructExample::new("Actor"));
    /// let b = a.clone();
    /// let c = Example::structure(StructExample::new("Actor"));
    ///
    /// assert!(a.same_instance(&b));
    /// assert!(!a.same_instance(&c));
    /// assert_eq!(a, c);
    /// ```
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Struct(a), Self::Struct(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns the struct instance, if this is one.
    #[must_use]
    pub fn as_struct(&self) -> Option<&StructExample> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Number of elements for list and array examples.
    #[must_use]
    pub fn element_count(&self) -> Option<usize> {
        match self {
            Self::List(items) | Self::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Encodes the example as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SerializationError`] if encoding fails.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(|e| crate::Error::SerializationError {
            message: format!("failed to encode example: {e}"),
            source: Some(e),
        })
    }
}

impl From<serde_json::Value> for Example {
    fn from(value: serde_json::Value) -> Self {
        Self::Literal(value)
    }
}

impl Serialize for Example {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(value) => value.serialize(serializer),
            Self::List(items) | Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Struct(value) => value.serialize(serializer),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Placeholder => serializer.serialize_map(Some(0))?.end(),
            Self::Unit => serializer.serialize_unit(),
        }
    }
}

/// A struct instance: exported fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructExample {
    /// Struct name
    pub type_name: String,
    /// Field name and value pairs
    pub fields: Vec<(String, Example)>,
}

impl StructExample {
    /// Creates an instance with no fields set.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Example> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

impl Serialize for StructExample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// What the synthesizer puts into list examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListPolicy {
    /// One synthesized element per list
    #[default]
    Populated,
    /// Always empty; matches documentation generated by earlier releases,
    /// which dropped the synthesized element
    Empty,
}

impl ListPolicy {
    /// Returns the string representation of the policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Populated => "populated",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for ListPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "populated" => Ok(Self::Populated),
            "empty" => Ok(Self::Empty),
            _ => Err(crate::Error::InvalidArgument(format!(
                "invalid list policy: '{s}' (expected: populated or empty)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message() -> StructExample {
        StructExample {
            type_name: "Message".to_string(),
            fields: vec![
                ("to".to_string(), Example::literal(json!("t01234"))),
                ("nonce".to_string(), Example::literal(json!(42))),
                ("params".to_string(), Example::literal(json!("Ynl0ZSBhcnJheQ=="))),
            ],
        }
    }

    #[test]
    fn test_struct_encodes_fields_in_declaration_order() {
        let encoded = Example::structure(message()).to_json().unwrap();
        assert_eq!(
            encoded,
            r#"{"to":"t01234","nonce":42,"params":"Ynl0ZSBhcnJheQ=="}"#
        );
    }

    #[test]
    fn test_placeholder_and_unit_encoding() {
        assert_eq!(Example::Placeholder.to_json().unwrap(), "{}");
        assert_eq!(Example::Unit.to_json().unwrap(), "null");
        assert_eq!(Example::List(vec![]).to_json().unwrap(), "[]");
        assert_eq!(
            Example::Map(vec![("t01236".to_string(), Example::literal(json!(42)))])
                .to_json()
                .unwrap(),
            r#"{"t01236":42}"#
        );
    }

    #[test]
    fn test_same_instance_requires_shared_allocation() {
        let a = Example::structure(message());
        let b = Example::structure(message());
        assert_eq!(a, b);
        assert!(!a.same_instance(&b));
        assert!(a.same_instance(&a.clone()));
        assert!(!Example::Unit.same_instance(&Example::Unit));
    }

    #[test]
    fn test_struct_field_lookup() {
        let value = message();
        assert_eq!(value.field("nonce"), Some(&Example::literal(json!(42))));
        assert!(value.field("value").is_none());
    }

    #[test]
    fn test_len_only_for_sequences() {
        assert_eq!(Example::Array(vec![Example::Unit; 3]).element_count(), Some(3));
        assert_eq!(Example::literal(json!(1)).element_count(), None);
    }

    #[test]
    fn test_list_policy_parsing() {
        assert_eq!("empty".parse::<ListPolicy>().unwrap(), ListPolicy::Empty);
        assert_eq!("Populated".parse::<ListPolicy>().unwrap(), ListPolicy::Populated);
        assert!("one".parse::<ListPolicy>().is_err());
        assert_eq!(ListPolicy::default().to_string(), "populated");
    }
}
