//! Type catalog: the reflection layer over parsed sources.
//!
//! Collects every non-generic named-field struct, type alias and integer
//! constant in a source tree, and maps `syn` types onto [`TypeDesc`]
//! shapes:
//!
//! | Source type | Descriptor |
//! |---|---|
//! | `Vec<T>`, `VecDeque<T>`, `[T]` | `List(T)` |
//! | `[T; N]` | `Array(T, N)` |
//! | `Option<T>`, `Box<T>`, `Arc<T>`, `Rc<T>` | `Pointer(T)` |
//! | `Receiver<T>`, `UnboundedReceiver<T>`, `BoxStream<T>`, `impl Stream<Item = T>` | `Chan(T)` |
//! | `dyn Trait`, `impl Trait` | `Interface(Trait)` |
//! | known struct | `Struct(name)` |
//! | `()` | `Unit` |
//! | anything else | `Named(canonical name)` |
//!
//! References are transparent and `str` is treated as `String`.
//!
//! # Examples
//!
//! ```
//! use docgen_core::TypeDesc;
//! use docgen_introspector::{SourceTree, TypeCatalog};
//!
//! let tree = SourceTree::from_source(
//!     "types.rs",
//!     "pub struct Actor { pub code: Cid, pub nonce: u64 }
//!      pub type ActorList = Vec<Actor>;",
//! );
//! let catalog = TypeCatalog::from_files(&tree.parse().unwrap()).unwrap();
//!
//! assert_eq!(
//!     catalog.resolve_str("ActorList").unwrap(),
//!     TypeDesc::list(TypeDesc::structure("Actor"))
//! );
//! ```

use crate::source::ParsedFile;
use docgen_core::{Error, FieldDef, Result, StructTable, TypeDesc};
use quote::ToTokens;
use std::collections::{HashMap, HashSet};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{GenericArgument, PathArguments, Token, Type, TypeParamBound};

/// Alias chains longer than this are treated as cycles.
const MAX_ALIAS_DEPTH: usize = 32;

/// Struct layouts, aliases and constants found in a source tree.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    structs: StructTable,
    aliases: HashMap<String, Type>,
    consts: HashMap<String, usize>,
}

impl TypeCatalog {
    /// Builds the catalog from parsed files.
    ///
    /// # Errors
    ///
    /// Returns an error if a struct field has a type that cannot be
    /// described (see [`TypeCatalog::resolve`]).
    pub fn from_files(files: &[ParsedFile]) -> Result<Self> {
        let mut collected = Collected::default();
        for file in files {
            collected.visit_items(&file.ast.items);
        }

        let mut catalog = Self {
            structs: StructTable::new(),
            aliases: collected.aliases,
            consts: collected.consts,
        };

        let struct_names: HashSet<String> =
            collected.structs.iter().map(|s| s.ident.to_string()).collect();

        for item in &collected.structs {
            let rename_all = serde_rename_all(&item.attrs);
            let mut fields = Vec::new();
            for field in &item.fields {
                let Some(ident) = &field.ident else { continue };
                let serde = SerdeField::from_attrs(&field.attrs);
                if serde.skip {
                    continue;
                }
                let name = serde.rename.unwrap_or_else(|| {
                    apply_rename_all(&ident.unraw().to_string(), rename_all.as_deref())
                });
                let ty = catalog.resolve_with(&field.ty, &struct_names, 0)?;
                fields.push(FieldDef {
                    name,
                    ty,
                    exported: matches!(field.vis, syn::Visibility::Public(_)),
                });
            }
            catalog.structs.insert(item.ident.to_string(), fields);
        }

        tracing::debug!(
            structs = catalog.structs.len(),
            aliases = catalog.aliases.len(),
            "built type catalog"
        );
        Ok(catalog)
    }

    /// Struct layouts in the catalog.
    #[must_use]
    pub const fn structs(&self) -> &StructTable {
        &self.structs
    }

    /// Maps a source type onto a type descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for function pointers, macros,
    /// qualified paths, arrays without a known length and alias cycles.
    pub fn resolve(&self, ty: &Type) -> Result<TypeDesc> {
        self.resolve_with(ty, &HashSet::new(), 0)
    }

    /// Parses a type expression such as `HashMap<String, Actor>` and
    /// resolves it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the text is not a Rust type,
    /// or any error of [`TypeCatalog::resolve`].
    pub fn resolve_str(&self, expr: &str) -> Result<TypeDesc> {
        self.resolve(&parse_type_expr(expr)?)
    }

    /// Resolves the value type of a map type expression: the last generic
    /// argument, e.g. `Actor` for `HashMap<String, Actor>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the expression has no generic
    /// type argument.
    pub fn map_value_type(&self, expr: &str) -> Result<TypeDesc> {
        let ty = parse_type_expr(expr)?;
        let value = match &ty {
            Type::Path(p) => p
                .path
                .segments
                .last()
                .and_then(|seg| type_args(&seg.arguments).last().copied()),
            _ => None,
        };
        let value = value.ok_or_else(|| {
            Error::InvalidArgument(format!("`{expr}` has no value type argument"))
        })?;
        self.resolve(value)
    }

    fn is_struct(&self, name: &str, pending: &HashSet<String>) -> bool {
        self.structs.contains(name) || pending.contains(name)
    }

    fn resolve_with(&self, ty: &Type, pending: &HashSet<String>, depth: usize) -> Result<TypeDesc> {
        match ty {
            Type::Path(p) if p.qself.is_none() => self.resolve_path(ty, &p.path, pending, depth),
            Type::Reference(r) => self.resolve_with(&r.elem, pending, depth),
            Type::Paren(p) => self.resolve_with(&p.elem, pending, depth),
            Type::Group(g) => self.resolve_with(&g.elem, pending, depth),
            Type::Slice(s) => Ok(TypeDesc::list(self.resolve_with(&s.elem, pending, depth)?)),
            Type::Array(a) => {
                let len = self.array_len(&a.len).ok_or_else(|| Error::UnsupportedType {
                    type_name: render(ty),
                    reason: "array length is not an integer literal or known constant"
                        .to_string(),
                })?;
                Ok(TypeDesc::array(self.resolve_with(&a.elem, pending, depth)?, len))
            }
            Type::Tuple(t) if t.elems.is_empty() => Ok(TypeDesc::Unit),
            Type::Tuple(_) => Ok(TypeDesc::Named(render(ty))),
            Type::TraitObject(t) => Ok(TypeDesc::Interface(bound_name(&t.bounds))),
            Type::ImplTrait(t) => match stream_item(&t.bounds) {
                Some(item) => Ok(TypeDesc::chan(self.resolve_with(item, pending, depth)?)),
                None => Ok(TypeDesc::Interface(bound_name(&t.bounds))),
            },
            other => Err(Error::UnsupportedType {
                type_name: render(other),
                reason: "no example shape for this kind of type".to_string(),
            }),
        }
    }

    fn resolve_path(
        &self,
        ty: &Type,
        path: &syn::Path,
        pending: &HashSet<String>,
        depth: usize,
    ) -> Result<TypeDesc> {
        let Some(last) = path.segments.last() else {
            return Ok(TypeDesc::Named(render(ty)));
        };
        let name = last.ident.to_string();
        let args = type_args(&last.arguments);

        let desc = match (name.as_str(), args.as_slice()) {
            ("Vec" | "VecDeque", [elem]) => {
                TypeDesc::list(self.resolve_with(elem, pending, depth)?)
            }
            ("Option" | "Box" | "Arc" | "Rc", [inner]) => {
                TypeDesc::pointer(self.resolve_with(inner, pending, depth)?)
            }
            ("Receiver" | "UnboundedReceiver" | "BoxStream", [item]) => {
                TypeDesc::chan(self.resolve_with(item, pending, depth)?)
            }
            ("String" | "str", []) => TypeDesc::named("String"),
            (_, []) => {
                if let Some(target) = self.aliases.get(&name) {
                    if depth >= MAX_ALIAS_DEPTH {
                        return Err(Error::UnsupportedType {
                            type_name: name,
                            reason: "type alias cycle".to_string(),
                        });
                    }
                    return self.resolve_with(target, pending, depth + 1);
                }
                if self.is_struct(&name, pending) {
                    TypeDesc::Struct(name)
                } else {
                    TypeDesc::Named(name)
                }
            }
            _ => TypeDesc::Named(render(ty)),
        };
        Ok(desc)
    }

    fn array_len(&self, expr: &syn::Expr) -> Option<usize> {
        match expr {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Int(int),
                ..
            }) => int.base10_parse().ok(),
            syn::Expr::Path(p) => p
                .path
                .get_ident()
                .and_then(|ident| self.consts.get(&ident.to_string()).copied()),
            syn::Expr::Group(g) => self.array_len(&g.expr),
            syn::Expr::Paren(p) => self.array_len(&p.expr),
            _ => None,
        }
    }
}

/// Parses a type expression.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the text is not a Rust type.
pub fn parse_type_expr(expr: &str) -> Result<Type> {
    syn::parse_str(expr)
        .map_err(|e| Error::InvalidArgument(format!("`{expr}` is not a type: {e}")))
}

/// Canonical display name of a type: path prefixes, lifetimes and
/// references dropped, `str` spelled `String`.
///
/// # Examples
///
/// ```
/// use docgen_introspector::catalog::{parse_type_expr, render};
///
/// let ty = parse_type_expr("std::collections::HashMap<&'static str, types::Actor>").unwrap();
/// assert_eq!(render(&ty), "HashMap<String, Actor>");
/// ```
#[must_use]
pub fn render(ty: &Type) -> String {
    match ty {
        Type::Path(p) if p.qself.is_none() => match p.path.segments.last() {
            Some(seg) => {
                let ident = seg.ident.to_string();
                let args = type_args(&seg.arguments);
                if args.is_empty() {
                    if ident == "str" { "String".to_string() } else { ident }
                } else {
                    let rendered: Vec<String> = args.into_iter().map(render).collect();
                    format!("{ident}<{}>", rendered.join(", "))
                }
            }
            None => String::new(),
        },
        Type::Reference(r) => render(&r.elem),
        Type::Paren(p) => render(&p.elem),
        Type::Group(g) => render(&g.elem),
        Type::Slice(s) => format!("[{}]", render(&s.elem)),
        Type::Array(a) => format!("[{}; {}]", render(&a.elem), a.len.to_token_stream()),
        Type::Tuple(t) => {
            let rendered: Vec<String> = t.elems.iter().map(render).collect();
            format!("({})", rendered.join(", "))
        }
        Type::TraitObject(t) => format!("dyn {}", bound_name(&t.bounds)),
        Type::ImplTrait(t) => format!("impl {}", bound_name(&t.bounds)),
        other => other.to_token_stream().to_string(),
    }
}

fn type_args(arguments: &PathArguments) -> Vec<&Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn bound_name(bounds: &Punctuated<TypeParamBound, Token![+]>) -> String {
    bounds
        .iter()
        .find_map(|bound| match bound {
            TypeParamBound::Trait(t) => t.path.segments.last().map(|s| s.ident.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "Any".to_string())
}

fn stream_item(bounds: &Punctuated<TypeParamBound, Token![+]>) -> Option<&Type> {
    bounds.iter().find_map(|bound| {
        let TypeParamBound::Trait(t) = bound else {
            return None;
        };
        let seg = t.path.segments.last()?;
        if seg.ident != "Stream" {
            return None;
        }
        let PathArguments::AngleBracketed(args) = &seg.arguments else {
            return None;
        };
        args.args.iter().find_map(|arg| match arg {
            GenericArgument::AssocType(assoc) if assoc.ident == "Item" => Some(&assoc.ty),
            _ => None,
        })
    })
}

/// Items gathered in a first pass, before struct fields are resolved.
#[derive(Default)]
struct Collected {
    structs: Vec<NamedStruct>,
    aliases: HashMap<String, Type>,
    consts: HashMap<String, usize>,
}

struct NamedStruct {
    ident: syn::Ident,
    attrs: Vec<syn::Attribute>,
    fields: Vec<syn::Field>,
}

impl Collected {
    fn visit_items(&mut self, items: &[syn::Item]) {
        for item in items {
            match item {
                syn::Item::Struct(s) if s.generics.params.is_empty() => {
                    if let syn::Fields::Named(named) = &s.fields {
                        self.structs.push(NamedStruct {
                            ident: s.ident.clone(),
                            attrs: s.attrs.clone(),
                            fields: named.named.iter().cloned().collect(),
                        });
                    }
                }
                syn::Item::Type(t) if t.generics.params.is_empty() => {
                    self.aliases.insert(t.ident.to_string(), (*t.ty).clone());
                }
                syn::Item::Const(c) => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Int(int),
                        ..
                    }) = c.expr.as_ref()
                        && let Ok(value) = int.base10_parse::<usize>()
                    {
                        self.consts.insert(c.ident.to_string(), value);
                    }
                }
                syn::Item::Mod(m) => {
                    if let Some((_, items)) = &m.content {
                        self.visit_items(items);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Serde attributes that change a field's JSON encoding.
#[derive(Debug, Default)]
struct SerdeField {
    rename: Option<String>,
    skip: bool,
}

impl SerdeField {
    fn from_attrs(attrs: &[syn::Attribute]) -> Self {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                    let name: syn::LitStr = meta.value()?.parse()?;
                    out.rename = Some(name.value());
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    out.skip = true;
                } else {
                    skip_meta_value(&meta)?;
                }
                Ok(())
            });
            if let Err(e) = parsed {
                tracing::debug!(error = %e, "ignoring unparsable serde attribute");
            }
        }
        out
    }
}

fn serde_rename_all(attrs: &[syn::Attribute]) -> Option<String> {
    let mut rename_all = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") && meta.input.peek(Token![=]) {
                let rule: syn::LitStr = meta.value()?.parse()?;
                rename_all = Some(rule.value());
            } else {
                skip_meta_value(&meta)?;
            }
            Ok(())
        });
        if let Err(e) = parsed {
            tracing::debug!(error = %e, "ignoring unparsable serde attribute");
        }
    }
    rename_all
}

fn skip_meta_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta_value(&inner))?;
    }
    Ok(())
}

/// Applies a serde `rename_all` rule to a snake_case field name.
fn apply_rename_all(field: &str, rule: Option<&str>) -> String {
    match rule {
        None | Some("snake_case") => field.to_string(),
        Some("camelCase") => to_camel_case(field),
        Some("PascalCase") => to_pascal_case(field),
        Some("lowercase") => field.to_lowercase(),
        Some("UPPERCASE" | "SCREAMING_SNAKE_CASE") => field.to_uppercase(),
        Some("kebab-case") => field.replace('_', "-"),
        Some("SCREAMING-KEBAB-CASE") => field.replace('_', "-").to_uppercase(),
        Some(other) => {
            tracing::debug!(rule = other, "unknown rename_all rule");
            field.to_string()
        }
    }
}

fn to_camel_case(snake_case: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for ch in snake_case.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(ch.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

fn to_pascal_case(snake_case: &str) -> String {
    let camel = to_camel_case(snake_case);
    let mut chars = camel.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceTree;

    fn catalog(src: &str) -> TypeCatalog {
        let tree = SourceTree::from_source("types.rs", src);
        TypeCatalog::from_files(&tree.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_container_shapes() {
        let catalog = catalog("pub struct BlockHeader { pub height: ChainEpoch }");

        assert_eq!(
            catalog.resolve_str("Vec<Cid>").unwrap(),
            TypeDesc::list(TypeDesc::named("Cid"))
        );
        assert_eq!(
            catalog.resolve_str("&[u8]").unwrap(),
            TypeDesc::list(TypeDesc::named("u8"))
        );
        assert_eq!(
            catalog.resolve_str("[u8; 32]").unwrap(),
            TypeDesc::array(TypeDesc::named("u8"), 32)
        );
        assert_eq!(
            catalog.resolve_str("Option<Box<BlockHeader>>").unwrap(),
            TypeDesc::pointer(TypeDesc::pointer(TypeDesc::structure("BlockHeader")))
        );
        assert_eq!(
            catalog.resolve_str("tokio::sync::mpsc::Receiver<BlockHeader>").unwrap(),
            TypeDesc::chan(TypeDesc::structure("BlockHeader"))
        );
        assert_eq!(catalog.resolve_str("()").unwrap(), TypeDesc::Unit);
    }

    #[test]
    fn test_strings_and_references() {
        let catalog = catalog("");
        assert_eq!(catalog.resolve_str("&str").unwrap(), TypeDesc::named("String"));
        assert_eq!(catalog.resolve_str("&'a String").unwrap(), TypeDesc::named("String"));
    }

    #[test]
    fn test_trait_objects_and_streams() {
        let catalog = catalog("");
        assert_eq!(
            catalog.resolve_str("Box<dyn Signer + Send>").unwrap(),
            TypeDesc::pointer(TypeDesc::interface("Signer"))
        );
        assert_eq!(
            catalog.resolve_str("impl Stream<Item = HeadChange> + Send").unwrap(),
            TypeDesc::chan(TypeDesc::named("HeadChange"))
        );
        assert_eq!(
            catalog.resolve_str("impl Iterator<Item = u8>").unwrap(),
            TypeDesc::interface("Iterator")
        );
    }

    #[test]
    fn test_maps_and_tuples_are_named_leaves() {
        let catalog = catalog("pub struct Actor { pub nonce: u64 }");
        assert_eq!(
            catalog.resolve_str("std::collections::HashMap<String, Actor>").unwrap(),
            TypeDesc::named("HashMap<String, Actor>")
        );
        assert_eq!(
            catalog.resolve_str("(Cid, u64)").unwrap(),
            TypeDesc::named("(Cid, u64)")
        );
    }

    #[test]
    fn test_struct_fields_exported_and_renamed() {
        let catalog = catalog(
            r#"
            #[derive(Serialize)]
            #[serde(rename_all = "PascalCase")]
            pub struct Message {
                pub version: u64,
                pub to: Address,
                #[serde(rename = "Params")]
                pub params_bytes: Vec<u8>,
                #[serde(skip)]
                pub cached_cid: Option<Cid>,
                nonce_hint: u64,
            }
            "#,
        );

        let fields = catalog.structs().fields("Message").unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Version", "To", "Params", "NonceHint"]);
        assert!(fields[0].exported);
        assert!(!fields[3].exported);
        assert_eq!(fields[2].ty, TypeDesc::list(TypeDesc::named("u8")));
    }

    #[test]
    fn test_struct_referencing_later_struct() {
        let catalog = catalog(
            "pub struct TipSet { pub blocks: Vec<BlockHeader> }
             pub struct BlockHeader { pub parent: Option<Box<BlockHeader>> }",
        );
        let tipset = catalog.structs().fields("TipSet").unwrap();
        assert_eq!(tipset[0].ty, TypeDesc::list(TypeDesc::structure("BlockHeader")));
        let header = catalog.structs().fields("BlockHeader").unwrap();
        assert_eq!(
            header[0].ty,
            TypeDesc::pointer(TypeDesc::pointer(TypeDesc::structure("BlockHeader")))
        );
    }

    #[test]
    fn test_generic_and_tuple_structs_are_leaves() {
        let catalog = catalog(
            "pub struct ChainEpoch(pub i64);
             pub struct Page<T> { pub items: Vec<T> }",
        );
        assert_eq!(catalog.resolve_str("ChainEpoch").unwrap(), TypeDesc::named("ChainEpoch"));
        assert_eq!(catalog.resolve_str("Page<Cid>").unwrap(), TypeDesc::named("Page<Cid>"));
        assert!(catalog.structs().is_empty());
    }

    #[test]
    fn test_aliases_and_nested_modules() {
        let catalog = catalog(
            "pub mod chain {
                 pub struct TipSet { pub height: ChainEpoch }
                 pub type Height = ChainEpoch;
             }
             pub type Tips = Vec<TipSet>;",
        );
        assert_eq!(catalog.resolve_str("Height").unwrap(), TypeDesc::named("ChainEpoch"));
        assert_eq!(
            catalog.resolve_str("Tips").unwrap(),
            TypeDesc::list(TypeDesc::structure("TipSet"))
        );
    }

    #[test]
    fn test_alias_cycle_is_rejected() {
        let catalog = catalog("pub type A = B; pub type B = A;");
        let err = catalog.resolve_str("A").unwrap_err();
        assert!(err.is_unsupported_type());
    }

    #[test]
    fn test_array_length_from_constant() {
        let catalog = catalog("pub const SIG_LEN: usize = 96;");
        assert_eq!(
            catalog.resolve_str("[u8; SIG_LEN]").unwrap(),
            TypeDesc::array(TypeDesc::named("u8"), 96)
        );
        assert!(catalog.resolve_str("[u8; N * 2]").unwrap_err().is_unsupported_type());
    }

    #[test]
    fn test_function_pointer_unsupported() {
        let catalog = catalog("");
        let err = catalog.resolve_str("fn(u8) -> u8").unwrap_err();
        assert!(err.is_unsupported_type());
    }

    #[test]
    fn test_map_value_type() {
        let catalog = catalog("pub struct MarketDeal { pub proposal: Cid }");
        assert_eq!(
            catalog.map_value_type("HashMap<String, MarketDeal>").unwrap(),
            TypeDesc::structure("MarketDeal")
        );
        assert!(catalog.map_value_type("u64").is_err());
        assert!(catalog.map_value_type("not a type <").is_err());
    }

    #[test]
    fn test_rename_all_rules() {
        assert_eq!(apply_rename_all("msg_cid", Some("camelCase")), "msgCid");
        assert_eq!(apply_rename_all("msg_cid", Some("PascalCase")), "MsgCid");
        assert_eq!(apply_rename_all("msg_cid", Some("kebab-case")), "msg-cid");
        assert_eq!(apply_rename_all("msg_cid", Some("SCREAMING_SNAKE_CASE")), "MSG_CID");
        assert_eq!(apply_rename_all("msg_cid", None), "msg_cid");
    }
}
