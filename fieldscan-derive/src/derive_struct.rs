//! Struct-specific `Record` derivation.
//!
//! This module builds the static shape descriptor for a struct's fields and
//! the per-field value references, and collects generic parameters that
//! require `Render` bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Fields, Index, Member, Result};

use crate::{
    directive::parse_field_directive,
    field::{is_readable, parse_field_options},
    generics::collect_generics_from_type,
};

pub(crate) struct StructDeriveOutput {
    pub(crate) fields_body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<StructDeriveOutput> {
    let fields: Vec<syn::Field> = match data.fields {
        Fields::Named(fields) => fields.named.into_iter().collect(),
        Fields::Unnamed(fields) => fields.unnamed.into_iter().collect(),
        Fields::Unit => Vec::new(),
    };

    if fields.is_empty() {
        return Ok(StructDeriveOutput {
            fields_body: quote! { ::std::vec::Vec::new() },
            used_generics: Vec::new(),
        });
    }

    let mut shapes = Vec::new();
    let mut refs = Vec::new();
    let mut used_generics = Vec::new();

    for (index, field) in fields.into_iter().enumerate() {
        let span = field.span();
        let name = field
            .ident
            .as_ref()
            .map_or_else(|| index.to_string(), |ident| ident.unraw().to_string());
        let member = field
            .ident
            .clone()
            .map_or_else(|| Member::Unnamed(Index::from(index)), Member::Named);
        let options = parse_field_options(&field.attrs)?;
        let directive = parse_field_directive(&field.attrs)?;

        if !is_readable(&field.vis, &options) {
            if directive.is_some() {
                return Err(syn::Error::new(
                    span,
                    "#[secret] has no effect on a hidden field: make it `pub` or remove the directive",
                ));
            }
            shapes.push(quote_spanned! { span => #crate_root::FieldShape::hidden(#name) });
            refs.push(quote_spanned! { span => #crate_root::Field::hidden(&SHAPE[#index]) });
            continue;
        }

        collect_generics_from_type(&field.ty, generics, &mut used_generics);
        let shape = match directive {
            Some(directive) => {
                let directive = directive.to_tokens(crate_root);
                quote_spanned! { span =>
                    #crate_root::FieldShape::readable(#name).with_directive(#directive)
                }
            }
            None => quote_spanned! { span => #crate_root::FieldShape::readable(#name) },
        };
        shapes.push(shape);
        refs.push(quote_spanned! { span =>
            #crate_root::Field::new(&SHAPE[#index], &self.#member)
        });
    }

    Ok(StructDeriveOutput {
        fields_body: quote! {
            const SHAPE: &[#crate_root::FieldShape] = &[#(#shapes),*];
            ::std::vec![#(#refs),*]
        },
        used_generics,
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{Data, DeriveInput};

    use super::*;

    fn expand(tokens: TokenStream) -> Result<StructDeriveOutput> {
        let input: DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        let Data::Struct(data) = input.data else {
            panic!("expected a struct");
        };
        derive_struct(data, &input.generics, &quote! { ::fieldscan })
    }

    #[test]
    fn unit_struct_has_no_shape() {
        let output = expand(quote! { struct Empty; }).unwrap();
        assert_eq!(
            output.fields_body.to_string(),
            quote! { ::std::vec::Vec::new() }.to_string()
        );
    }

    #[test]
    fn hidden_fields_do_not_bound_generics() {
        let output = expand(quote! {
            struct Wrapper<T, U> {
                pub shown: T,
                hidden: U,
            }
        })
        .unwrap();
        let used: Vec<String> = output.used_generics.iter().map(ToString::to_string).collect();
        assert_eq!(used, vec!["T"]);
        let body = output.fields_body.to_string();
        assert!(body.contains("FieldShape :: hidden (\"hidden\")"));
    }

    #[test]
    fn directive_on_hidden_field_errors() {
        let result = expand(quote! {
            struct Config {
                #[secret]
                password: String,
            }
        });
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("hidden field"));
    }

    #[test]
    fn raw_identifiers_are_unraw_in_names() {
        let output = expand(quote! {
            struct Config {
                pub r#type: String,
            }
        })
        .unwrap();
        assert!(output.fields_body.to_string().contains("readable (\"type\")"));
    }

    #[test]
    fn tuple_fields_are_named_by_index() {
        let output = expand(quote! {
            struct Pair(pub String, #[secret(mask = 2)] pub String);
        })
        .unwrap();
        let body = output.fields_body.to_string();
        assert!(body.contains("readable (\"0\")"));
        assert!(body.contains("MaskLeft (2usize)"));
    }
}
