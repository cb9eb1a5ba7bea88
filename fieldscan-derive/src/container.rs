//! Type-level `#[scan(...)]` options.

use syn::{Attribute, Meta, Result};

/// Options parsed from `#[scan(...)]` on the deriving type.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// If true, the type renders through `Display` instead of its fields.
    pub(crate) display: bool,
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if attr.path().is_ident("secret") {
            return Err(syn::Error::new_spanned(
                attr,
                "#[secret] belongs on fields, not on the type",
            ));
        }
        if !attr.path().is_ident("scan") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("display") {
                        options.display = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown type option; expected `display`"))
                    }
                })?;
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected a list of type options, e.g. #[scan(display)]",
                ));
            }
        }
    }

    Ok(options)
}
