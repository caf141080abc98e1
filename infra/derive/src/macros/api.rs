use super::derived_trait_names;
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Data, DeriveInput, Expr, Lit, LitStr, Meta, Token};

const MODEL_DERIVES: [&str; 5] = ["Debug", "Clone", "PartialEq", "Serialize", "Deserialize"];

#[derive(Default)]
struct ModelArgs {
    defaults: bool,
    strict: bool,
    rename_all: Option<LitStr>,
}

#[derive(Default)]
struct ExistingSerde {
    default: bool,
    deny_unknown_fields: bool,
    rename_all: bool,
}

/// Expands the `#[api_model]` attribute macro.
pub fn expand_api_model(args: TokenStream, input: DeriveInput) -> TokenStream {
    let args = match parse_args(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };

    if matches!(input.data, Data::Enum(_)) && (args.defaults || args.strict) {
        return syn::Error::new_spanned(
            &input.ident,
            "api_model(defaults) and api_model(strict) only apply to structs",
        )
        .to_compile_error();
    }

    let existing = match existing_serde(&input.attrs) {
        Ok(existing) => existing,
        Err(err) => return err.to_compile_error(),
    };

    let derived = derived_trait_names(&input.attrs);
    let missing = MODEL_DERIVES.iter().filter(|name| !derived.contains(**name)).map(|name| {
        match *name {
            "Serialize" => quote! { ::serde::Serialize },
            "Deserialize" => quote! { ::serde::Deserialize },
            other => {
                let ident = syn::Ident::new(other, proc_macro2::Span::call_site());
                quote! { #ident }
            },
        }
    });
    let missing: Vec<_> = missing.collect();
    let derive_attr =
        if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } };

    let default_attr =
        if args.defaults && !existing.default { quote! { #[serde(default)] } } else { quote! {} };
    let strict_attr = if args.strict && !existing.deny_unknown_fields {
        quote! { #[serde(deny_unknown_fields)] }
    } else {
        quote! {}
    };
    let rename_attr = match (&args.rename_all, existing.rename_all) {
        (Some(lit), false) => quote! { #[serde(rename_all = #lit)] },
        (Some(lit), true) => {
            return syn::Error::new_spanned(
                lit,
                "rename_all is already set with #[serde]; keep only one of them",
            )
            .to_compile_error();
        },
        (None, _) => quote! {},
    };

    quote! {
        #derive_attr
        #default_attr
        #strict_attr
        #rename_attr
        #input
    }
}

fn parse_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = ModelArgs::default();

    for meta in metas {
        match &meta {
            Meta::Path(path) if path.is_ident("defaults") => {
                parsed.defaults = set_flag(parsed.defaults, &meta)?;
            },
            Meta::Path(path) if path.is_ident("strict") => {
                parsed.strict = set_flag(parsed.strict, &meta)?;
            },
            Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                if parsed.rename_all.is_some() {
                    return Err(syn::Error::new_spanned(&meta, "Duplicate argument"));
                }
                let Expr::Lit(expr) = &nv.value else {
                    return Err(syn::Error::new_spanned(&nv.value, "rename_all must be a string"));
                };
                let Lit::Str(lit) = &expr.lit else {
                    return Err(syn::Error::new_spanned(&nv.value, "rename_all must be a string"));
                };
                parsed.rename_all = Some(lit.clone());
            },
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Unsupported argument; expected defaults, strict or rename_all = \"...\"",
                ));
            },
        }
    }

    Ok(parsed)
}

fn set_flag(current: bool, meta: &Meta) -> syn::Result<bool> {
    if current {
        return Err(syn::Error::new_spanned(meta, "Duplicate argument"));
    }
    Ok(true)
}

fn existing_serde(attrs: &[Attribute]) -> syn::Result<ExistingSerde> {
    let mut existing = ExistingSerde::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                existing.default = true;
                if meta.input.peek(Token![=]) {
                    let _: LitStr = meta.value()?.parse()?;
                }
            } else if meta.path.is_ident("deny_unknown_fields") {
                existing.deny_unknown_fields = true;
            } else if meta.path.is_ident("rename_all") {
                existing.rename_all = true;
                let _: LitStr = meta.value()?.parse()?;
            } else if meta.input.peek(Token![=]) {
                let _: Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        })?;
    }

    Ok(existing)
}
