//! Example value synthesis.
//!
//! [`Synthesizer::synthesize`] answers from the registry when it can and
//! otherwise builds a value from the shape of the type:
//!
//! - list: one synthesized element, or none under [`ListPolicy::Empty`]
//! - channel or stream: the example of its element type
//! - struct: every exported field in declaration order; the result is
//!   memoized, so later lookups share the instance
//! - fixed array: the element example repeated to the array length
//! - pointer to struct: a fresh, unmemoized instance unless the struct's
//!   name has a built-in literal; any other pointer yields the example of
//!   its target
//! - trait object: an empty placeholder
//! - unit: `null`
//!
//! Leaves without a registered example are an error.

use crate::registry::ExampleRegistry;
use docgen_core::{Error, Example, ListPolicy, Result, StructExample, StructTable, TypeDesc};
use std::collections::HashSet;

/// Builds example values on top of an [`ExampleRegistry`].
///
/// # Examples
///
/// ```
/// use docgen_codegen::{ExampleRegistry, Synthesizer};
/// use docgen_core::{FieldDef, StructTable, TypeDesc};
///
/// let mut structs = StructTable::new();
/// structs.insert(
///     "Actor",
///     vec![
///         FieldDef::exported("Code", TypeDesc::named("Cid")),
///         FieldDef::exported("Nonce", TypeDesc::named("u64")),
///     ],
/// );
/// let mut registry = ExampleRegistry::with_defaults();
/// let mut synth = Synthesizer::new(&mut registry, &structs);
///
/// let actor = synth.synthesize(&TypeDesc::structure("Actor")).unwrap();
/// assert_eq!(
///     actor.to_json().unwrap(),
///     r#"{"Code":{"/":"bafy2bzacea3wsdh6y3a36tb3skempjoxqpuyompjbmfeyf34fi3uy6uue42v4"},"Nonce":42}"#
/// );
/// ```
#[derive(Debug)]
pub struct Synthesizer<'a> {
    registry: &'a mut ExampleRegistry,
    structs: &'a StructTable,
    list_policy: ListPolicy,
    in_progress: HashSet<String>,
}

impl<'a> Synthesizer<'a> {
    /// Creates a synthesizer with the default list policy.
    #[must_use]
    pub fn new(registry: &'a mut ExampleRegistry, structs: &'a StructTable) -> Self {
        Self {
            registry,
            structs,
            list_policy: ListPolicy::default(),
            in_progress: HashSet::new(),
        }
    }

    /// Sets what list examples contain.
    #[must_use]
    pub const fn with_list_policy(mut self, policy: ListPolicy) -> Self {
        self.list_policy = policy;
        self
    }

    /// The list policy in effect.
    #[must_use]
    pub const fn list_policy(&self) -> ListPolicy {
        self.list_policy
    }

    /// Registers an example in the underlying registry.
    pub fn register(&mut self, ty: TypeDesc, example: Example) {
        self.registry.insert(ty, example);
    }

    /// Returns an example value for a type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoExample`] naming the first leaf type without a
    /// registered example, or [`Error::RecursiveType`] for a struct that
    /// contains itself.
    pub fn synthesize(&mut self, ty: &TypeDesc) -> Result<Example> {
        if let Some(example) = self.registry.lookup(ty) {
            return Ok(example.clone());
        }

        match ty {
            TypeDesc::List(elem) => {
                let item = self.synthesize(elem)?;
                Ok(match self.list_policy {
                    ListPolicy::Populated => Example::List(vec![item]),
                    ListPolicy::Empty => Example::List(Vec::new()),
                })
            }
            TypeDesc::Chan(elem) => self.synthesize(elem),
            TypeDesc::Struct(name) => {
                let example = self.build_struct(name)?;
                self.registry.insert(ty.clone(), example.clone());
                Ok(example)
            }
            TypeDesc::Array(elem, len) => {
                let item = self.synthesize(elem)?;
                Ok(Example::Array(vec![item; *len]))
            }
            TypeDesc::Pointer(inner) => match inner.as_ref() {
                TypeDesc::Struct(name) => {
                    let seeded = TypeDesc::named(name.as_str());
                    match self.registry.lookup(&seeded) {
                        Some(example) => Ok(example.clone()),
                        None => self.build_struct(name),
                    }
                }
                other => self.synthesize(other),
            },
            TypeDesc::Interface(_) => Ok(Example::Placeholder),
            TypeDesc::Unit => Ok(Example::Unit),
            TypeDesc::Named(name) => Err(Error::NoExample {
                type_name: name.clone(),
            }),
        }
    }

    fn build_struct(&mut self, name: &str) -> Result<Example> {
        let structs = self.structs;
        let fields = structs.fields(name).ok_or_else(|| Error::NoExample {
            type_name: name.to_string(),
        })?;

        if !self.in_progress.insert(name.to_string()) {
            return Err(Error::RecursiveType {
                type_name: name.to_string(),
            });
        }

        let mut instance = StructExample::new(name);
        let filled = fields
            .iter()
            .filter(|field| field.exported)
            .try_for_each(|field| -> Result<()> {
                let value = self.synthesize(&field.ty)?;
                instance.fields.push((field.name.clone(), value));
                Ok(())
            });
        self.in_progress.remove(name);
        filled?;

        tracing::debug!(
            type_name = name,
            fields = instance.fields.len(),
            "synthesized struct example"
        );
        Ok(Example::structure(instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgen_core::FieldDef;
    use serde_json::json;

    fn structs() -> StructTable {
        let mut structs = StructTable::new();
        structs.insert(
            "Message",
            vec![
                FieldDef::exported("To", TypeDesc::named("Address")),
                FieldDef::exported("Nonce", TypeDesc::named("u64")),
                FieldDef::private("cache", TypeDesc::named("Unregistered")),
                FieldDef::exported("Params", TypeDesc::list(TypeDesc::named("u8"))),
            ],
        );
        structs.insert(
            "SignedMessage",
            vec![
                FieldDef::exported("Message", TypeDesc::structure("Message")),
                FieldDef::exported("Signature", TypeDesc::pointer(TypeDesc::named("Signature"))),
            ],
        );
        structs.insert(
            "BlockHeader",
            vec![
                FieldDef::exported("Height", TypeDesc::named("ChainEpoch")),
                FieldDef::exported(
                    "Parent",
                    TypeDesc::pointer(TypeDesc::structure("BlockHeader")),
                ),
            ],
        );
        structs
    }

    #[test]
    fn test_registered_scalar_returned_as_is() {
        let structs = StructTable::new();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);

        assert_eq!(
            synth.synthesize(&TypeDesc::named("Address")).unwrap(),
            Example::literal(json!("t01234"))
        );
        assert_eq!(
            synth.synthesize(&TypeDesc::named("SectorSize")).unwrap(),
            Example::literal(json!(34_359_738_368_u64))
        );
    }

    #[test]
    fn test_struct_skips_private_fields_and_memoizes() {
        let structs = structs();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);
        let ty = TypeDesc::structure("Message");

        let first = synth.synthesize(&ty).unwrap();
        let msg = first.as_struct().unwrap();
        let names: Vec<_> = msg.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["To", "Nonce", "Params"]);
        assert_eq!(msg.field("Nonce"), Some(&Example::literal(json!(42))));

        let second = synth.synthesize(&ty).unwrap();
        assert!(first.same_instance(&second));
        assert!(registry.contains(&ty));
    }

    #[test]
    fn test_pointer_to_struct_is_fresh() {
        let structs = structs();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);
        let ptr = TypeDesc::pointer(TypeDesc::structure("Message"));

        let a = synth.synthesize(&ptr).unwrap();
        let b = synth.synthesize(&ptr).unwrap();
        assert_eq!(a, b);
        assert!(!a.same_instance(&b));
        assert!(!registry.contains(&TypeDesc::structure("Message")));
    }

    #[test]
    fn test_seeded_struct_short_circuits() {
        let mut structs = StructTable::new();
        structs.insert("Cid", vec![FieldDef::private("bytes", TypeDesc::named("Multihash"))]);
        structs.insert(
            "TipSetKey",
            vec![FieldDef::private("cids", TypeDesc::list(TypeDesc::structure("Cid")))],
        );
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);
        let cid = json!({ "/": "bafy2bzacea3wsdh6y3a36tb3skempjoxqpuyompjbmfeyf34fi3uy6uue42v4" });

        assert_eq!(
            synth.synthesize(&TypeDesc::structure("Cid")).unwrap(),
            Example::literal(cid.clone())
        );
        assert_eq!(
            synth
                .synthesize(&TypeDesc::pointer(TypeDesc::structure("Cid")))
                .unwrap(),
            Example::literal(cid)
        );
        let key = synth.synthesize(&TypeDesc::structure("TipSetKey")).unwrap();
        assert_eq!(key.element_count(), None);
        assert!(key.to_json().unwrap().starts_with("[{\"/\":"));
    }

    #[test]
    fn test_nested_struct_shares_memoized_instance() {
        let structs = structs();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);

        let signed = synth
            .synthesize(&TypeDesc::pointer(TypeDesc::structure("SignedMessage")))
            .unwrap_err();
        assert!(signed.is_missing_example());
        assert!(signed.to_string().contains("Signature"));

        synth.register(TypeDesc::named("Signature"), Example::literal(json!({"Type": 2})));
        let signed = synth
            .synthesize(&TypeDesc::structure("SignedMessage"))
            .unwrap();
        let message = synth.synthesize(&TypeDesc::structure("Message")).unwrap();
        assert!(
            signed
                .as_struct()
                .unwrap()
                .field("Message")
                .unwrap()
                .same_instance(&message)
        );
    }

    #[test]
    fn test_list_policies() {
        let structs = StructTable::new();
        let mut registry = ExampleRegistry::with_defaults();
        let list = TypeDesc::list(TypeDesc::named("Address"));

        let populated = Synthesizer::new(&mut registry, &structs)
            .synthesize(&list)
            .unwrap();
        assert_eq!(populated.to_json().unwrap(), r#"["t01234"]"#);

        let mut synth =
            Synthesizer::new(&mut registry, &structs).with_list_policy(ListPolicy::Empty);
        assert_eq!(synth.list_policy(), ListPolicy::Empty);
        assert_eq!(synth.synthesize(&list).unwrap().to_json().unwrap(), "[]");

        // Bytes are a registered leaf, not a list
        assert_eq!(
            synth
                .synthesize(&TypeDesc::list(TypeDesc::named("u8")))
                .unwrap()
                .to_json()
                .unwrap(),
            r#""Ynl0ZSBhcnJheQ==""#
        );
    }

    #[test]
    fn test_empty_list_still_requires_element_example() {
        let structs = StructTable::new();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth =
            Synthesizer::new(&mut registry, &structs).with_list_policy(ListPolicy::Empty);

        let err = synth
            .synthesize(&TypeDesc::list(TypeDesc::named("Unknown")))
            .unwrap_err();
        assert_eq!(err.to_string(), "No example value for type: Unknown");
    }

    #[test]
    fn test_array_repeats_element() {
        let structs = StructTable::new();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);

        let example = synth
            .synthesize(&TypeDesc::array(TypeDesc::named("u8"), 32))
            .unwrap();
        assert_eq!(example.element_count(), Some(32));
        let Example::Array(items) = example else {
            panic!("expected array example");
        };
        assert!(items.iter().all(|i| *i == Example::literal(json!(7))));
    }

    #[test]
    fn test_chan_interface_unit_and_optional() {
        let structs = StructTable::new();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);

        assert_eq!(
            synth
                .synthesize(&TypeDesc::chan(TypeDesc::named("MpoolChange")))
                .unwrap(),
            Example::literal(json!(0))
        );
        assert_eq!(
            synth
                .synthesize(&TypeDesc::interface("Any"))
                .unwrap()
                .to_json()
                .unwrap(),
            "{}"
        );
        assert_eq!(synth.synthesize(&TypeDesc::Unit).unwrap(), Example::Unit);
        assert_eq!(
            synth
                .synthesize(&TypeDesc::pointer(TypeDesc::named("u64")))
                .unwrap(),
            Example::literal(json!(42))
        );
    }

    #[test]
    fn test_unresolvable_leaf_names_type() {
        let structs = StructTable::new();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);

        let err = synth.synthesize(&TypeDesc::named("Context")).unwrap_err();
        assert!(err.is_missing_example());
        assert!(err.to_string().contains("Context"));
    }

    #[test]
    fn test_recursive_struct_is_an_error() {
        let structs = structs();
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);

        let err = synth
            .synthesize(&TypeDesc::structure("BlockHeader"))
            .unwrap_err();
        assert!(err.is_recursive_type());

        // The guard is released after the failure
        let err = synth
            .synthesize(&TypeDesc::structure("BlockHeader"))
            .unwrap_err();
        assert!(err.is_recursive_type());
        assert!(!registry.contains(&TypeDesc::structure("BlockHeader")));
    }

    #[test]
    fn test_failed_struct_not_memoized() {
        let mut structs = StructTable::new();
        structs.insert(
            "Deal",
            vec![
                FieldDef::exported("Id", TypeDesc::named("DealId")),
                FieldDef::exported("State", TypeDesc::named("DealState")),
            ],
        );
        let mut registry = ExampleRegistry::with_defaults();
        let mut synth = Synthesizer::new(&mut registry, &structs);

        assert!(synth.synthesize(&TypeDesc::structure("Deal")).is_err());
        assert!(!registry.contains(&TypeDesc::structure("Deal")));
    }
}
