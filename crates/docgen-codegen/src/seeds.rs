//! Built-in example literals and their installation.
//!
//! The literals are the values a reader of the documentation would expect
//! to see for well-known chain types: real-looking CIDs, addresses and peer
//! IDs, and enum values spelled as their wire integers.

use crate::registry::ExampleRegistry;
use crate::synthesizer::Synthesizer;
use docgen_core::{Example, MapExample, Result, TypeDesc};
use docgen_introspector::TypeCatalog;
use serde_json::{Value, json};
use std::collections::BTreeMap;

const CID: &str = "bafy2bzacea3wsdh6y3a36tb3skempjoxqpuyompjbmfeyf34fi3uy6uue42v4";
const CID_2: &str = "bafy2bzacebp3shtrn43k7g3unredz7fxn4gj533d3o43tqn2p2ipxxhrvchve";
const PEER_ID: &str = "12D3KooWGzxzKZYveHXtpG6AsrUJBcWxHBFS2HsEoGTxrMLvKXtf";
const MULTIADDR: &str =
    "/ip4/52.36.61.156/tcp/1347/p2p/12D3KooWFETiESTf1v4PGUvtnxMAcEFMzLZbJGg4tjWfGEimYior";

/// Literal examples keyed by leaf type name.
fn named_literals() -> Vec<(&'static str, Value)> {
    vec![
        ("String", json!("string value")),
        ("u64", json!(42)),
        ("u8", json!(7)),
        ("Permission", json!("write")),
        ("Cid", json!({ "/": CID })),
        ("TipSetKey", json!([{ "/": CID }, { "/": CID_2 }])),
        ("Address", json!("t01234")),
        ("PeerId", json!(PEER_ID)),
        // run-length encoding of {5}
        ("BitField", json!([5, 1])),
        ("RegisteredProof", json!(8)),
        ("ChainEpoch", json!(10101)),
        // BLS
        ("SigType", json!(2)),
        ("i64", json!(9)),
        ("MethodNum", json!(1)),
        ("ExitCode", json!(0)),
        ("DomainSeparationTag", json!(2)),
        ("bool", json!(true)),
        ("UnpaddedPieceSize", json!(1024)),
        ("PaddedPieceSize", json!(1032)),
        ("DealId", json!(5432)),
        ("FileStatus", json!(3)),
        ("SectorNumber", json!(9)),
        ("SectorSize", json!(34_359_738_368_u64)),
        ("MpoolChange", json!(0)),
        ("Connectedness", json!(1)),
        ("NetworkName", json!("lotus")),
        ("SyncStateStage", json!(1)),
        ("Version", json!(768)),
        ("PchDir", json!(1)),
        // one minute in nanoseconds
        ("Duration", json!(60_000_000_000_u64)),
        ("Multiaddr", json!(MULTIADDR)),
    ]
}

/// The built-in examples.
#[must_use]
pub fn default_examples() -> Vec<(TypeDesc, Example)> {
    let mut examples: Vec<(TypeDesc, Example)> = named_literals()
        .into_iter()
        .map(|(name, value)| (TypeDesc::named(name), Example::literal(value)))
        .collect();
    // "byte array", base64 as JSON encodes byte slices
    examples.push((
        TypeDesc::list(TypeDesc::named("u8")),
        Example::literal(json!("Ynl0ZSBhcnJheQ==")),
    ));
    examples
}

/// The built-in map examples.
#[must_use]
pub fn default_map_examples() -> Vec<MapExample> {
    vec![
        MapExample::new("HashMap<String, Actor>", "t01236"),
        MapExample::new("HashMap<String, MarketDeal>", "t026363"),
        MapExample::new("HashMap<String, MarketBalance>", "t026363"),
    ]
}

/// Registers configured literals, keyed by type expression.
///
/// # Errors
///
/// Returns an error if a key is not a type expression the catalog can
/// resolve.
pub fn install_literal_examples(
    registry: &mut ExampleRegistry,
    catalog: &TypeCatalog,
    examples: &BTreeMap<String, Value>,
) -> Result<()> {
    for (expr, value) in examples {
        let ty = catalog.resolve_str(expr)?;
        tracing::debug!(ty = %ty, "registered configured example");
        registry.insert(ty, Example::literal(value.clone()));
    }
    Ok(())
}

/// Registers map examples of the form `{key: <example of the value type>}`.
///
/// With `required` unset, a map whose value type cannot be synthesized is
/// skipped; otherwise the synthesis error is returned.
///
/// # Errors
///
/// Returns an error if a map type expression has no value type, or a value
/// cannot be synthesized and `required` is set.
pub fn install_map_examples(
    synth: &mut Synthesizer<'_>,
    catalog: &TypeCatalog,
    maps: &[MapExample],
    required: bool,
) -> Result<()> {
    for map in maps {
        let map_ty = catalog.resolve_str(&map.map_type)?;
        let value_ty = catalog.map_value_type(&map.map_type)?;
        let value = match synth.synthesize(&value_ty) {
            Ok(value) => value,
            Err(err) if !required => {
                tracing::debug!(map = %map.map_type, error = %err, "skipped map example");
                continue;
            }
            Err(err) => return Err(err),
        };
        synth.register(map_ty, Example::Map(vec![(map.key.clone(), value)]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_keys_unique() {
        let examples = default_examples();
        let keys: HashSet<_> = examples.iter().map(|(ty, _)| ty.clone()).collect();
        assert_eq!(keys.len(), examples.len());
    }

    #[test]
    fn test_domain_literals() {
        let examples: Vec<_> = default_examples();
        let get = |name: &str| {
            examples
                .iter()
                .find(|(ty, _)| *ty == TypeDesc::named(name))
                .map(|(_, ex)| ex.to_json().unwrap())
                .unwrap()
        };

        assert_eq!(get("TipSetKey"), format!(r#"[{{"/":"{CID}"}},{{"/":"{CID_2}"}}]"#));
        assert_eq!(get("SectorSize"), "34359738368");
        assert_eq!(get("Duration"), "60000000000");
        assert_eq!(get("BitField"), "[5,1]");
        assert_eq!(get("Multiaddr"), format!("\"{MULTIADDR}\""));
    }

    #[test]
    fn test_default_map_examples() {
        let maps = default_map_examples();
        assert_eq!(maps.len(), 3);
        assert_eq!(maps[0].key, "t01236");
        assert!(maps.iter().skip(1).all(|m| m.key == "t026363"));
    }

    #[test]
    fn test_bad_configured_key() {
        let mut registry = ExampleRegistry::new();
        let mut examples = BTreeMap::new();
        examples.insert("Vec<".to_string(), json!(1));

        let err = install_literal_examples(&mut registry, &TypeCatalog::default(), &examples)
            .unwrap_err();
        assert!(matches!(err, docgen_core::Error::InvalidArgument(_)));
        assert!(registry.is_empty());
    }
}
