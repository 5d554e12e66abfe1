//! Paths into `mu_nested` used by the generated code.
//!
//! Every function takes the crate path, which is `::mu_nested` unless
//! overridden with `#[nested(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

/// The default path of the `mu_nested` crate.
pub(crate) fn mu_nested() -> syn::Path {
    syn::parse_quote!(::mu_nested)
}

#[inline(always)]
pub(crate) fn nested_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::Nested
    }
}

#[inline(always)]
pub(crate) fn object_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::ops::Object
    }
}

#[inline(always)]
pub(crate) fn nested_ref_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::ops::NestedRef
    }
}

#[inline(always)]
pub(crate) fn nested_mut_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::ops::NestedMut
    }
}

#[inline(always)]
pub(crate) fn write_error_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::ops::WriteError
    }
}

#[inline(always)]
pub(crate) fn take_value_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::ops::take_value
    }
}

#[inline(always)]
pub(crate) fn box_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::__macro_exports::Box
    }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! {
        ::core::option::Option
    }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! {
        ::core::result::Result
    }
}
