use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{Attribute, ItemFn, ItemStruct, LitStr, Meta};

/// Expands `#[api_model]`: common derives, `ToSchema` behind the `server` feature and a
/// serde `rename_all` policy (camelCase unless overridden).
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let rename_all = match parse_rename_all(args) {
        Ok(value) => value,
        Err(err) => return err,
    };

    let derives = derived_trait_names(&input.attrs);
    let missing: Vec<TokenStream> = [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ]
    .into_iter()
    .filter(|(name, _)| !derives.contains(*name))
    .map(|(_, tokens)| tokens)
    .collect();

    let derive_attr = if missing.is_empty() { quote!() } else { quote! { #[derive(#(#missing),*)] } };
    let schema_attr = if derives.contains("ToSchema") {
        quote!()
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };
    let rename_attr = if has_serde_rename_all(&input.attrs) {
        quote!()
    } else {
        quote! { #[serde(rename_all = #rename_all)] }
    };

    quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #input
    }
}

/// Expands `#[api_handler]`: forwards the arguments to `utoipa::path` when the `server`
/// feature is enabled and silences `unused_async` for extractor-only handlers.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_rename_all(args: TokenStream) -> Result<LitStr, TokenStream> {
    let default = LitStr::new("camelCase", proc_macro2::Span::call_site());
    if args.is_empty() {
        return Ok(default);
    }

    let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
    let metas = parser.parse2(args).map_err(|err| err.to_compile_error())?;

    let mut rename_all = None;
    for meta in metas {
        match meta {
            Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                if rename_all.is_some() {
                    return Err(
                        syn::Error::new_spanned(nv, "Duplicate argument").to_compile_error()
                    );
                }
                let syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(lit), .. }) = nv.value
                else {
                    return Err(syn::Error::new_spanned(
                        nv.value,
                        "rename_all must be a string literal",
                    )
                    .to_compile_error());
                };
                rename_all = Some(lit);
            },
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Unsupported argument; expected `rename_all = \"...\"`",
                )
                .to_compile_error());
            },
        }
    }

    Ok(rename_all.unwrap_or(default))
}

fn has_serde_rename_all(attrs: &[Attribute]) -> bool {
    let mut found = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                found = true;
            }
            // Skip values such as `rename_all = "..."` without failing the walk.
            if meta.input.peek(syn::Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            }
            Ok(())
        });
    }
    found
}

fn derived_trait_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}
