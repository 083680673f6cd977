use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Ident, ItemFn, ReturnType, Type};

pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if let Err(err) = check_signature(&input) {
        return err.to_compile_error();
    }
    let profile = match runtime_profile(args) {
        Ok(profile) => profile,
        Err(err) => return err.to_compile_error(),
    };

    let ItemFn { attrs, vis, sig, block } = input;
    let (ident, output) = (&sig.ident, &sig.output);

    quote! {
        #(#attrs)*
        #vis fn #ident() #output {
            ::shop_runtime::build_runtime_with_config(&#profile)?.block_on(async #block)
        }
    }
}

fn check_signature(input: &ItemFn) -> syn::Result<()> {
    if input.sig.asyncness.is_none() {
        return Err(Error::new_spanned(
            input.sig.fn_token,
            "#[shop_runtime::main] expects an async fn",
        ));
    }
    let returns_result = match &input.sig.output {
        ReturnType::Type(_, ty) => matches!(
            &**ty,
            Type::Path(path) if path.path.segments.last().is_some_and(|s| s.ident == "Result")
        ),
        ReturnType::Default => false,
    };
    if !returns_result {
        return Err(Error::new_spanned(
            &input.sig.ident,
            "#[shop_runtime::main] expects a function returning Result",
        ));
    }
    Ok(())
}

/// Maps the optional profile argument to a `RuntimeConfig` constructor.
fn runtime_profile(args: TokenStream) -> syn::Result<TokenStream> {
    if args.is_empty() {
        return Ok(quote!(::shop_runtime::RuntimeConfig::default()));
    }
    let profile: Ident = syn::parse2(args)?;
    let constructor = match profile.to_string().as_str() {
        "default" => quote!(default),
        "high_performance" => quote!(high_performance),
        "memory_efficient" => quote!(memory_efficient),
        other => {
            return Err(Error::new_spanned(
                &profile,
                format!("unknown runtime profile `{other}`, expected default, high_performance or memory_efficient"),
            ));
        },
    };
    Ok(quote!(::shop_runtime::RuntimeConfig::#constructor()))
}
