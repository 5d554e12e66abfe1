//! See [`Nested`](derive_nested).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static NESTED_ATTRIBUTE_NAME: &str = "nested";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Object Derivation
///
/// `#[derive(Nested)]` implements `Nested` and `Object` for a struct with
/// named fields. Every field becomes an attribute reachable with `.name`.
///
/// Field types must implement `Nested` themselves. Writes through
/// `Object::set_attr` downcast the value to the field type, and unknown
/// names are rejected, since a struct can not grow new fields.
///
/// Tuple structs, unit structs, enums and unions are not supported.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Nested)]
/// struct Foo {
///     // reachable as `.id` instead of `.raw_id`
///     #[nested(rename = "id")]
///     raw_id: u64,
///     // not an attribute, and does not need to implement `Nested`
///     #[nested(skip)]
///     cache: Cache,
/// }
/// ```
///
/// Attribute names can not contain path operators (`.`, `[`, `#`, `]`).
///
/// ## Crate Path
///
/// The generated code refers to `::mu_nested` by default. When the crate is
/// reached through a re-export, set the path explicitly:
///
/// ```rust, ignore
/// #[derive(Nested)]
/// #[nested(crate = "miscutils::nested")]
/// struct Foo { /* ... */ }
/// ```
#[proc_macro_derive(Nested, attributes(nested))]
pub fn derive_nested(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let info = match derive_data::NestedStruct::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let trait_nested = impls::impl_trait_nested(&info);
    let trait_object = impls::impl_trait_object(&info);

    TokenStream::from(quote! {
        const _: () = {
            #trait_nested

            #trait_object
        };
    })
}
