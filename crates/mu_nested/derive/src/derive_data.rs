use std::collections::HashSet;

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Generics, Ident, LitStr, Path, Type};

use crate::NESTED_ATTRIBUTE_NAME;

/// A field exposed as an attribute.
pub(crate) struct NestedField<'a> {
    pub member: &'a Ident,
    pub name: String,
    pub ty: &'a Type,
}

/// Everything the generated impls need to know about the input struct.
pub(crate) struct NestedStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub crate_path: Path,
    pub fields: Vec<NestedField<'a>>,
}

#[derive(Default)]
struct FieldAttributes {
    skip: bool,
    rename: Option<LitStr>,
}

fn parse_crate_path(input: &DeriveInput) -> syn::Result<Path> {
    let mut crate_path = None;

    for attr in &input.attrs {
        if !attr.path().is_ident(NESTED_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                crate_path = Some(lit.parse::<Path>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported attribute, expected `crate = \"...\"`"))
            }
        })?;
    }

    Ok(crate_path.unwrap_or_else(crate::path::mu_nested))
}

fn parse_field_attributes(field: &syn::Field) -> syn::Result<FieldAttributes> {
    let mut attrs = FieldAttributes::default();

    for attr in &field.attrs {
        if !attr.path().is_ident(NESTED_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                attrs.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported attribute, expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }

    Ok(attrs)
}

impl<'a> NestedStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) | Fields::Unit => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Nested` can only be derived for structs with named fields",
                    ));
                }
            },
            Data::Enum(_) | Data::Union(_) => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "`Nested` can only be derived for structs",
                ));
            }
        };

        let crate_path = parse_crate_path(input)?;

        let mut fields = Vec::with_capacity(named.named.len());
        let mut seen = HashSet::new();

        for field in &named.named {
            let attrs = parse_field_attributes(field)?;
            if attrs.skip {
                continue;
            }

            let member = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;

            let (name, span) = match &attrs.rename {
                Some(lit) => (lit.value(), lit.span()),
                None => (member.unraw().to_string(), member.span()),
            };

            if name.is_empty() || name.contains(['.', '[', '#', ']']) {
                return Err(syn::Error::new(
                    span,
                    "attribute names must be non-empty and can not contain `.`, `[`, `#` or `]`",
                ));
            }
            if !seen.insert(name.clone()) {
                return Err(syn::Error::new(span, format!("duplicate attribute name `{name}`")));
            }

            fields.push(NestedField {
                member,
                name,
                ty: &field.ty,
            });
        }

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            crate_path,
            fields,
        })
    }
}
