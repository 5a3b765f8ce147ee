// Copyright (C) Microsoft Corporation. All rights reserved.

//! Proc macro for the `#[test]` attribute exported by `test_with_tracing`.
//!
//! The attribute keeps the annotated function intact and prepends a call to
//! `test_with_tracing::init()` so the subscriber is installed before the body
//! runs. The function is then re-emitted under the built-in test attribute.

use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;
use syn::spanned::Spanned;
use syn::ItemFn;

/// Marks a function as a test with `tracing` output captured.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return syn::Error::new(attr.span(), "#[test] takes no arguments")
            .to_compile_error()
            .into();
    }

    let func = parse_macro_input!(item as ItemFn);
    expand(func).into()
}

fn expand(func: ItemFn) -> proc_macro2::TokenStream {
    if func.sig.asyncness.is_some() {
        return syn::Error::new(func.sig.span(), "async tests are not supported")
            .to_compile_error();
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;

    quote! {
        #[::core::prelude::v1::test]
        #(#attrs)*
        #vis #sig {
            ::test_with_tracing::init();
            #block
        }
    }
}
