//! Type descriptors and method descriptors.
//!
//! [`TypeDesc`] is a closed set of value shapes. The synthesizer dispatches
//! on it with a single `match`, and the example registry uses it as a key.
//! Struct layouts are kept out of the descriptor in a [`StructTable`] so
//! that self-referencing structs can still be described.
//!
//! # Examples
//!
//! ```
//! use docgen_core::TypeDesc;
//!
//! let ty = TypeDesc::list(TypeDesc::named("Cid"));
//! assert_eq!(ty.to_string(), "Vec<Cid>");
//!
//! let ty = TypeDesc::array(TypeDesc::named("u8"), 32);
//! assert_eq!(ty.to_string(), "[u8; 32]");
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Shape of a type reachable from an interface's method signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    /// The empty tuple, reported for methods without a return value.
    Unit,
    /// A leaf type identified by its canonical name (`u64`, `Cid`,
    /// `HashMap<String, Actor>`). Resolved through the registry only.
    Named(String),
    /// Growable list of elements.
    List(Box<TypeDesc>),
    /// Fixed-size array with a declared length.
    Array(Box<TypeDesc>, usize),
    /// Channel-like pipe yielding elements of the inner type.
    Chan(Box<TypeDesc>),
    /// Named-field struct whose layout lives in a [`StructTable`].
    Struct(String),
    /// Optional value or owning pointer to the inner type.
    Pointer(Box<TypeDesc>),
    /// Polymorphic slot (trait object).
    Interface(String),
}

impl TypeDesc {
    /// Creates a leaf type descriptor.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates a list descriptor.
    #[must_use]
    pub fn list(elem: Self) -> Self {
        Self::List(Box::new(elem))
    }

    /// Creates a fixed-size array descriptor.
    #[must_use]
    pub fn array(elem: Self, len: usize) -> Self {
        Self::Array(Box::new(elem), len)
    }

    /// Creates a channel descriptor.
    #[must_use]
    pub fn chan(elem: Self) -> Self {
        Self::Chan(Box::new(elem))
    }

    /// Creates a struct reference.
    #[must_use]
    pub fn structure(name: impl Into<String>) -> Self {
        Self::Struct(name.into())
    }

    /// Creates a pointer or optional descriptor.
    #[must_use]
    pub fn pointer(inner: Self) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Creates a polymorphic slot descriptor.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::Interface(name.into())
    }

    /// Returns the struct name when this descriptor is a struct reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_core::TypeDesc;
    ///
    /// assert_eq!(TypeDesc::structure("Actor").as_struct(), Some("Actor"));
    /// assert_eq!(TypeDesc::named("u64").as_struct(), None);
    /// ```
    #[must_use]
    pub fn as_struct(&self) -> Option<&str> {
        match self {
            Self::Struct(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("()"),
            Self::Named(name) | Self::Struct(name) => f.write_str(name),
            Self::List(elem) => write!(f, "Vec<{elem}>"),
            Self::Array(elem, len) => write!(f, "[{elem}; {len}]"),
            Self::Chan(elem) => write!(f, "Receiver<{elem}>"),
            Self::Pointer(inner) => write!(f, "Option<{inner}>"),
            Self::Interface(name) => write!(f, "dyn {name}"),
        }
    }
}

/// One field of a named-field struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as declared
    pub name: String,
    /// Field type
    pub ty: TypeDesc,
    /// Whether the field is `pub` (only exported fields get example values)
    pub exported: bool,
}

impl FieldDef {
    /// Creates an exported field.
    #[must_use]
    pub fn exported(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            exported: true,
        }
    }

    /// Creates a private field.
    #[must_use]
    pub fn private(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            exported: false,
        }
    }
}

/// Struct layouts known to a documentation run, keyed by struct name.
///
/// # Examples
///
/// ```
/// use docgen_core::{FieldDef, StructTable, TypeDesc};
///
/// let mut table = StructTable::new();
/// table.insert("Actor", vec![FieldDef::exported("nonce", TypeDesc::named("u64"))]);
///
/// assert!(table.contains("Actor"));
/// assert_eq!(table.fields("Actor").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StructTable {
    structs: HashMap<String, Vec<FieldDef>>,
}

impl StructTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a struct layout.
    pub fn insert(&mut self, name: impl Into<String>, fields: Vec<FieldDef>) {
        self.structs.insert(name.into(), fields);
    }

    /// Returns the fields of a struct in declaration order.
    #[must_use]
    pub fn fields(&self, name: &str) -> Option<&[FieldDef]> {
        self.structs.get(name).map(Vec::as_slice)
    }

    /// Returns `true` if the struct is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    /// Number of known structs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    /// Returns `true` if no struct is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDesc {
    /// Binding name, or `_` for patterns
    pub name: String,
    /// Parameter type
    pub ty: TypeDesc,
}

/// A method of the documented interface.
///
/// `params` never includes the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDesc {
    /// Method name as declared
    pub name: String,
    /// Parameters in declaration order
    pub params: Vec<ParamDesc>,
    /// Return type (the success type for `Result` returns)
    pub returns: TypeDesc,
}

impl MethodDesc {
    /// Parameters left after skipping `skip` leading ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_core::{MethodDesc, ParamDesc, TypeDesc};
    ///
    /// let method = MethodDesc {
    ///     name: "state_get_actor".to_string(),
    ///     params: vec![
    ///         ParamDesc { name: "ctx".to_string(), ty: TypeDesc::named("Context") },
    ///         ParamDesc { name: "addr".to_string(), ty: TypeDesc::named("Address") },
    ///     ],
    ///     returns: TypeDesc::structure("Actor"),
    /// };
    ///
    /// assert_eq!(method.example_params(1).count(), 1);
    /// assert_eq!(method.example_params(5).count(), 0);
    /// ```
    pub fn example_params(&self, skip: usize) -> impl Iterator<Item = &ParamDesc> {
        self.params.iter().skip(skip)
    }
}

/// Order in which methods are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodOrder {
    /// Lexical order of method names
    #[default]
    Alphabetical,
    /// Order of declaration in the trait
    Declaration,
}

impl MethodOrder {
    /// Returns the string representation of the order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alphabetical => "alphabetical",
            Self::Declaration => "declaration",
        }
    }
}

impl fmt::Display for MethodOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MethodOrder {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alphabetical" => Ok(Self::Alphabetical),
            "declaration" => Ok(Self::Declaration),
            _ => Err(crate::Error::InvalidArgument(format!(
                "invalid method order: '{s}' (expected: alphabetical or declaration)"
            ))),
        }
    }
}

/// The documented interface: a trait name and its method set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDesc {
    /// Trait name
    pub name: String,
    /// Methods in declaration order
    pub methods: Vec<MethodDesc>,
}

impl InterfaceDesc {
    /// Returns the methods in the requested order.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_core::{InterfaceDesc, MethodDesc, MethodOrder, TypeDesc};
    ///
    /// let method = |name: &str| MethodDesc {
    ///     name: name.to_string(),
    ///     params: vec![],
    ///     returns: TypeDesc::Unit,
    /// };
    /// let iface = InterfaceDesc {
    ///     name: "FullNode".to_string(),
    ///     methods: vec![method("wallet_new"), method("chain_head")],
    /// };
    ///
    /// let names: Vec<_> = iface
    ///     .ordered_methods(MethodOrder::Alphabetical)
    ///     .iter()
    ///     .map(|m| m.name.as_str())
    ///     .collect();
    /// assert_eq!(names, ["chain_head", "wallet_new"]);
    /// ```
    #[must_use]
    pub fn ordered_methods(&self, order: MethodOrder) -> Vec<&MethodDesc> {
        let mut methods: Vec<&MethodDesc> = self.methods.iter().collect();
        if order == MethodOrder::Alphabetical {
            methods.sort_by(|a, b| a.name.cmp(&b.name));
        }
        methods
    }

    /// Looks up a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDesc> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> MethodDesc {
        MethodDesc {
            name: name.to_string(),
            params: vec![],
            returns: TypeDesc::Unit,
        }
    }

    #[test]
    fn test_display_nested_shapes() {
        let ty = TypeDesc::pointer(TypeDesc::list(TypeDesc::array(TypeDesc::named("u8"), 4)));
        assert_eq!(ty.to_string(), "Option<Vec<[u8; 4]>>");
        assert_eq!(
            TypeDesc::chan(TypeDesc::structure("HeadChange")).to_string(),
            "Receiver<HeadChange>"
        );
        assert_eq!(TypeDesc::interface("Signer").to_string(), "dyn Signer");
        assert_eq!(TypeDesc::Unit.to_string(), "()");
    }

    #[test]
    fn test_named_and_struct_are_distinct_keys() {
        assert_ne!(TypeDesc::named("Actor"), TypeDesc::structure("Actor"));
    }

    #[test]
    fn test_struct_table_preserves_field_order() {
        let mut table = StructTable::new();
        table.insert(
            "Message",
            vec![
                FieldDef::exported("to", TypeDesc::named("Address")),
                FieldDef::exported("from", TypeDesc::named("Address")),
                FieldDef::private("cached", TypeDesc::named("Cid")),
            ],
        );

        let names: Vec<_> = table
            .fields("Message")
            .unwrap()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["to", "from", "cached"]);
        assert!(!table.fields("Message").unwrap()[2].exported);
        assert!(table.fields("Missing").is_none());
    }

    #[test]
    fn test_ordered_methods_declaration_keeps_source_order() {
        let iface = InterfaceDesc {
            name: "FullNode".to_string(),
            methods: vec![method("wallet_new"), method("chain_head"), method("mpool_push")],
        };

        let declared: Vec<_> = iface
            .ordered_methods(MethodOrder::Declaration)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(declared, ["wallet_new", "chain_head", "mpool_push"]);

        let sorted: Vec<_> = iface
            .ordered_methods(MethodOrder::Alphabetical)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(sorted, ["chain_head", "mpool_push", "wallet_new"]);
    }

    #[test]
    fn test_method_order_parsing() {
        assert_eq!("declaration".parse::<MethodOrder>().unwrap(), MethodOrder::Declaration);
        assert_eq!("Alphabetical".parse::<MethodOrder>().unwrap(), MethodOrder::Alphabetical);
        assert!("random".parse::<MethodOrder>().is_err());
    }

    #[test]
    fn test_interface_method_lookup() {
        let iface = InterfaceDesc {
            name: "FullNode".to_string(),
            methods: vec![method("chain_head")],
        };
        assert!(iface.method("chain_head").is_some());
        assert!(iface.method("chain_tail").is_none());
    }
}
