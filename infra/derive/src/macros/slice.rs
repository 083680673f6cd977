use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::{Fields, ItemStruct, LitStr};

/// Turns the annotated struct into `<Name>Inner` and generates a cheap-to-clone `<Name>`
/// handle that can be registered in the server state.
pub fn expand_slice(args: TokenStream, input: ItemStruct) -> TokenStream {
    let name = match slice_name(args, &input) {
        Ok(name) => name,
        Err(err) => return err.to_compile_error(),
    };

    let ItemStruct { attrs, vis, ident, fields, .. } = input;
    let inner = format_ident!("{ident}Inner");
    let terminator = (!matches!(fields, Fields::Named(_))).then(|| quote!(;));
    let registry = quote!(::shop_kernel::domain::registry);

    quote! {
        #(#attrs)*
        #[derive(Debug)]
        #vis struct #inner #fields #terminator

        #[derive(Debug, Clone)]
        #vis struct #ident(std::sync::Arc<#inner>);

        impl #ident {
            pub const NAME: &'static str = #name;

            pub fn new(inner: #inner) -> Self {
                Self(std::sync::Arc::new(inner))
            }

            pub fn register(&self) -> #registry::InitializedSlice {
                #registry::InitializedSlice::new(Self::NAME, self.clone())
            }
        }

        impl std::ops::Deref for #ident {
            type Target = #inner;

            fn deref(&self) -> &#inner {
                &self.0
            }
        }

        impl #registry::FeatureSlice for #ident {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    }
}

/// `name = "..."` when given, otherwise the struct name in lowercase.
fn slice_name(args: TokenStream, input: &ItemStruct) -> syn::Result<LitStr> {
    let mut name = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse::<LitStr>()?);
            Ok(())
        } else {
            Err(meta.error("unsupported shop_slice argument, expected `name = \"...\"`"))
        }
    });
    parser.parse2(args)?;

    Ok(name.unwrap_or_else(|| {
        LitStr::new(&input.ident.to_string().to_lowercase(), input.ident.span())
    }))
}
