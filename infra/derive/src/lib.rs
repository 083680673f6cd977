#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the storefront crates:
//!
//! * [`shop_error`] turns an enum into a `thiserror` error with `.context(...)` helpers.
//! * [`shop_slice`] wraps a feature's state into an `Arc` handle registrable in the kernel.
//! * [`api_model`] and [`api_handler`] keep DTOs and Axum handlers consistent with `OpenAPI`.
//! * [`main`] boots an `async fn main` on a preconfigured Tokio runtime.
//!
//! Examples below are `ignore`d because a proc-macro crate cannot use its own macros in
//! doctests; the consuming crates exercise them in their tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the Tokio runtime from `shop-runtime`.
///
/// # Arguments
///
/// * `high_performance` - Server profile: all cores, larger stacks.
/// * `memory_efficient` - Small footprint profile for tooling.
/// * `default` or nothing - Default worker count and stack size.
///
/// # Examples
///
/// ```rust,ignore
/// #[shop_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for request/response DTOs.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, derives `utoipa::ToSchema`
/// when the consuming crate's `server` feature is enabled, and applies
/// `#[serde(rename_all = "camelCase")]` unless another policy is passed.
///
/// ```rust,ignore
/// #[api_model(rename_all = "snake_case")]
/// pub struct ProductDto {
///     pub id: u32,
///     pub unit_price: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `path = "..."`, `responses(...)`,
/// `tag = ...`) and forwards them when the `server` feature is on.
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthResponse)), tag = "System")]
/// pub async fn health_handler() -> Json<HealthResponse> { todo!() }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a crate error enum.
///
/// * Injects `#[derive(Debug, thiserror::Error)]`.
/// * Generates a `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant that wraps a source error.
/// * Implements `From<Source>` for those variants so `?` works on upstream errors.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal` variant exists.
///
/// Every variant must use named fields. Variants with a `source` (or a field marked
/// `#[source]`/`#[from]`) must also carry `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[shop_derive::shop_error]
/// pub enum CatalogError {
///     #[error("Database error{}: {source}", format_context(.context))]
///     Database { source: shop_database::DatabaseError, context: Option<Cow<'static, str>> },
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn shop_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Declares a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is an `Arc` wrapper that derefs to
/// it and implements `shop_kernel::domain::registry::FeatureSlice`. A `register()` method
/// produces the `InitializedSlice` the server state collects.
///
/// ```rust,ignore
/// #[shop_derive::shop_slice(name = "catalog")]
/// pub struct Catalog {
///     repository: ProductRepository,
/// }
/// ```
#[proc_macro_attribute]
pub fn shop_slice(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(attr.into(), input).into()
}
