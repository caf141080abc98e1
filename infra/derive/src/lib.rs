#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every Fleetdesk crate.
//!
//! * [`fdesk_error`] turns a plain enum into a crate error type with context support.
//! * [`api_model`] stamps the common derives and serde policy onto backend DTOs.
//!
//! Doc examples are `ignore`d because a proc-macro crate cannot use its own macros;
//! see `tests/ui` for compiled usage.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for backend data-transfer objects.
///
/// The REST backend owns every invariant, so DTOs only need a consistent shape:
///
/// * **Derives**: adds `Debug`, `Clone`, `PartialEq`, `Serialize` and `Deserialize`
///   unless they are already present.
/// * **`defaults`**: adds `#[serde(default)]` so fields missing from a response fall
///   back to `Default`. The type must implement `Default`.
/// * **`strict`**: adds `#[serde(deny_unknown_fields)]`. Off by default since the
///   backend is free to grow its payloads.
/// * **`rename_all = "..."`**: forwards a serde rename policy. The backend speaks
///   `snake_case`, so nothing is added unless asked for.
///
/// Works on structs and enums. `defaults` and `strict` are rejected on enums.
///
/// # Example
///
/// ```rust,ignore
/// use fdesk_derive::api_model;
///
/// #[api_model(defaults)]
/// #[derive(Default)]
/// pub struct Part {
///     pub id: u64,
///     pub name: String,
///     pub quantity_in_stock: i64,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro for crate error enums.
///
/// # Features
///
/// * **Automatic Derives**: injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, Error>` and to `Result<T, Source>` for every wrapped source type.
/// * **Conversions**: implements `From<Source>` for variants carrying a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Source-carrying variants must include `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use fdesk_derive::fdesk_error;
/// use std::borrow::Cow;
///
/// #[fdesk_error]
/// pub enum StoreError {
///     #[error("I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &std::path::Path) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("Reading token store")
/// }
/// ```
#[proc_macro_attribute]
pub fn fdesk_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
