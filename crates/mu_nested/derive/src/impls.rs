use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{Generics, WherePredicate, parse_quote};

use crate::derive_data::NestedStruct;
use crate::path;

/// Adds `'static` to every type parameter and `Nested` to every field type.
fn nested_generics(info: &NestedStruct) -> Generics {
    let nested_ = path::nested_(&info.crate_path);
    let mut generics = info.generics.clone();

    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }

    let where_clause = generics.make_where_clause();
    for field in &info.fields {
        let ty = field.ty;
        let predicate: WherePredicate = parse_quote!(#ty: #nested_);
        where_clause.predicates.push(predicate);
    }

    generics
}

pub(crate) fn impl_trait_nested(info: &NestedStruct) -> TokenStream {
    let crate_path = &info.crate_path;
    let nested_ = path::nested_(crate_path);
    let nested_ref_ = path::nested_ref_(crate_path);
    let nested_mut_ = path::nested_mut_(crate_path);

    let ident = info.ident;
    let generics = nested_generics(info);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #nested_ for #ident #ty_generics #where_clause {
            #[inline]
            fn nested_ref(&self) -> #nested_ref_<'_> {
                #nested_ref_::Object(self)
            }

            #[inline]
            fn nested_mut(&mut self) -> #nested_mut_<'_> {
                #nested_mut_::Object(self)
            }
        }
    }
}

pub(crate) fn impl_trait_object(info: &NestedStruct) -> TokenStream {
    let crate_path = &info.crate_path;
    let nested_ = path::nested_(crate_path);
    let object_ = path::object_(crate_path);
    let write_error_ = path::write_error_(crate_path);
    let take_value_ = path::take_value_(crate_path);
    let box_ = path::box_(crate_path);
    let option_ = path::option_();
    let result_ = path::result_();

    let ident = info.ident;
    let generics = nested_generics(info);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let members: Vec<_> = info.fields.iter().map(|field| field.member).collect();
    let names: Vec<_> = info.fields.iter().map(|field| field.name.as_str()).collect();
    let types: Vec<_> = info.fields.iter().map(|field| field.ty).collect();
    let indices: Vec<_> = (0..info.fields.len()).map(Literal::usize_unsuffixed).collect();
    let attr_len = info.fields.len();

    quote! {
        impl #impl_generics #object_ for #ident #ty_generics #where_clause {
            fn attr(&self, name: &str) -> #option_<&dyn #nested_> {
                match name {
                    #( #names => #option_::Some(&self.#members as &dyn #nested_), )*
                    _ => #option_::None,
                }
            }

            fn attr_mut(&mut self, name: &str) -> #option_<&mut dyn #nested_> {
                match name {
                    #( #names => #option_::Some(&mut self.#members as &mut dyn #nested_), )*
                    _ => #option_::None,
                }
            }

            fn set_attr(
                &mut self,
                name: &str,
                value: #box_<dyn #nested_>,
            ) -> #result_<(), #write_error_> {
                match name {
                    #(
                        #names => {
                            self.#members = #take_value_::<#types>(value)?;
                            #result_::Ok(())
                        }
                    )*
                    _ => {
                        ::core::mem::drop(value);
                        #result_::Err(#write_error_::MissingAttribute)
                    }
                }
            }

            #[inline]
            fn attr_len(&self) -> usize {
                #attr_len
            }

            fn name_at(&self, index: usize) -> #option_<&str> {
                match index {
                    #( #indices => #option_::Some(#names), )*
                    _ => #option_::None,
                }
            }

            fn attr_at(&self, index: usize) -> #option_<&dyn #nested_> {
                match index {
                    #( #indices => #option_::Some(&self.#members as &dyn #nested_), )*
                    _ => #option_::None,
                }
            }
        }
    }
}
