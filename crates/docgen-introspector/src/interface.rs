//! Method set extraction for the documented trait.
//!
//! The method set of a trait includes the methods of its supertraits when
//! those are defined in the same source tree, the way an embedded interface
//! contributes its methods. Supertrait methods come first in declaration
//! order.

use crate::catalog::TypeCatalog;
use crate::source::ParsedFile;
use docgen_core::{Error, InterfaceDesc, MethodDesc, ParamDesc, Result, TypeDesc};
use std::collections::HashSet;
use syn::{FnArg, GenericArgument, Pat, PathArguments, ReturnType, TraitItem, Type};

/// Finds a trait by name, at top level or inside inline modules.
#[must_use]
pub fn find_trait<'a>(files: &'a [ParsedFile], name: &str) -> Option<&'a syn::ItemTrait> {
    files
        .iter()
        .find_map(|file| find_in_items(&file.ast.items, name))
}

fn find_in_items<'a>(items: &'a [syn::Item], name: &str) -> Option<&'a syn::ItemTrait> {
    items.iter().find_map(|item| match item {
        syn::Item::Trait(t) if t.ident == name => Some(t),
        syn::Item::Mod(m) => m
            .content
            .as_ref()
            .and_then(|(_, items)| find_in_items(items, name)),
        _ => None,
    })
}

/// Extracts the method set of the named trait.
///
/// # Errors
///
/// Returns [`Error::InterfaceNotFound`] if no trait has that name, or an
/// [`Error::UnsupportedType`] naming the method whose signature cannot be
/// described.
pub fn extract_interface(
    catalog: &TypeCatalog,
    files: &[ParsedFile],
    name: &str,
) -> Result<InterfaceDesc> {
    let item = find_trait(files, name).ok_or_else(|| Error::InterfaceNotFound {
        name: name.to_string(),
    })?;

    let mut methods = Vec::new();
    let mut seen_traits = HashSet::from([name.to_string()]);
    collect_methods(catalog, files, item, &mut seen_traits, &mut methods)?;

    tracing::debug!(interface = name, methods = methods.len(), "extracted method set");
    Ok(InterfaceDesc {
        name: name.to_string(),
        methods,
    })
}

fn collect_methods(
    catalog: &TypeCatalog,
    files: &[ParsedFile],
    item: &syn::ItemTrait,
    seen_traits: &mut HashSet<String>,
    methods: &mut Vec<MethodDesc>,
) -> Result<()> {
    for bound in &item.supertraits {
        let syn::TypeParamBound::Trait(t) = bound else {
            continue;
        };
        let Some(seg) = t.path.segments.last() else {
            continue;
        };
        let super_name = seg.ident.to_string();
        if !seen_traits.insert(super_name.clone()) {
            continue;
        }
        match find_trait(files, &super_name) {
            Some(super_item) => collect_methods(catalog, files, super_item, seen_traits, methods)?,
            None => tracing::debug!(supertrait = %super_name, "supertrait not in source tree"),
        }
    }

    for trait_item in &item.items {
        let TraitItem::Fn(f) = trait_item else {
            continue;
        };
        let method = method_desc(catalog, &f.sig)?;
        if methods.iter().any(|m| m.name == method.name) {
            continue;
        }
        methods.push(method);
    }
    Ok(())
}

fn method_desc(catalog: &TypeCatalog, sig: &syn::Signature) -> Result<MethodDesc> {
    let name = sig.ident.to_string();
    let in_method = |err: Error| match err {
        Error::UnsupportedType { type_name, reason } => Error::UnsupportedType {
            type_name,
            reason: format!("{reason} (in method `{name}`)"),
        },
        other => other,
    };

    let mut params = Vec::new();
    for input in &sig.inputs {
        let FnArg::Typed(typed) = input else {
            continue;
        };
        let param_name = match typed.pat.as_ref() {
            Pat::Ident(ident) => ident.ident.to_string(),
            _ => "_".to_string(),
        };
        params.push(ParamDesc {
            name: param_name,
            ty: catalog.resolve(&typed.ty).map_err(in_method)?,
        });
    }

    let returns = match &sig.output {
        ReturnType::Default => TypeDesc::Unit,
        ReturnType::Type(_, ty) => catalog.resolve(success_type(ty)).map_err(in_method)?,
    };

    Ok(MethodDesc {
        name,
        params,
        returns,
    })
}

/// The success type of `Result<T, E>` and `Result` aliases such as
/// `RpcResult<T>`; any other type unchanged.
fn success_type(ty: &Type) -> &Type {
    let Type::Path(p) = ty else {
        return ty;
    };
    let Some(seg) = p.path.segments.last() else {
        return ty;
    };
    if !seg.ident.to_string().ends_with("Result") {
        return ty;
    }
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return ty;
    };
    args.args
        .iter()
        .find_map(|arg| match arg {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        })
        .unwrap_or(ty)
}
