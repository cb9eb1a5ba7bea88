//! Field-level `#[scan(...)]` options and the visibility policy.

use syn::{Attribute, Meta, Result, Visibility};

/// Options parsed from field-level `#[scan(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldOptions {
    /// If true, the field is hidden even when it is `pub`.
    pub(crate) skip: bool,
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("scan") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        options.skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown field option; expected `skip`"))
                    }
                })?;
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected a list of field options, e.g. #[scan(skip)]",
                ));
            }
        }
    }

    Ok(options)
}

/// Only plain `pub` fields are readable; restricted visibilities count as hidden.
pub(crate) fn is_readable(vis: &Visibility, options: &FieldOptions) -> bool {
    matches!(vis, Visibility::Public(_)) && !options.skip
}
